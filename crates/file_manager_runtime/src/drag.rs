//! Drag-and-drop decisions for moving items and uploading OS files.
//!
//! Item drags carry a [`DragPayload`] under [`DRAG_PAYLOAD_MIME`], which keeps them apart from
//! native OS file drags (advertised as [`NATIVE_FILES_TYPE`]). The functions here are pure: the
//! page glue reads the DOM event, asks for a decision, and dispatches the result.

use platform_host::FileScope;
use serde::{Deserialize, Serialize};

use crate::{
    model::{FileItem, FileManagerState, ItemId},
    reducer::ValidationError,
    view_mode::ViewMode,
};

/// Data-transfer type for in-app item moves.
pub const DRAG_PAYLOAD_MIME: &str = "application/x-dockora-move+json";
/// Data-transfer type browsers advertise for OS file drags.
pub const NATIVE_FILES_TYPE: &str = "Files";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Items being dragged and the scope they were listed under.
pub struct DragPayload {
    pub paths: Vec<String>,
    pub system_root_access: bool,
}

impl DragPayload {
    pub fn new(paths: Vec<String>, scope: FileScope) -> Self {
        Self {
            paths,
            system_root_access: scope.system_root_access(),
        }
    }

    pub fn scope(&self) -> FileScope {
        FileScope::from_system_root_access(self.system_root_access)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Label and icon hint for the synthetic drag image.
pub struct DragPreview {
    pub label: String,
    pub is_dir: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragStart {
    pub payload: DragPayload,
    pub preview: DragPreview,
    /// Set when the dragged item was not selected and the selection must collapse onto it.
    pub collapse_selection_to: Option<ItemId>,
}

/// Computes the drag set for a drag starting on `dragged`.
///
/// Returns `None` in restricted views or when the item is no longer listed.
pub fn begin_drag(state: &FileManagerState, dragged: &ItemId) -> Option<DragStart> {
    if state.view.is_restricted() {
        return None;
    }
    let item = state.find_item(dragged)?;

    let (items, collapse_selection_to): (Vec<&FileItem>, _) =
        if state.selection.contains(dragged) {
            (state.selected_items(), None)
        } else {
            (vec![item], Some(dragged.clone()))
        };

    let label = match items.as_slice() {
        [single] => single.name().to_string(),
        many => format!("{} items", many.len()),
    };
    let first_is_dir = items.first().is_some_and(|item| item.is_dir());
    let paths = items.iter().map(|item| item.path().to_string()).collect();

    Some(DragStart {
        payload: DragPayload::new(paths, state.scope),
        preview: DragPreview {
            label,
            is_dir: first_is_dir,
        },
        collapse_selection_to,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropDecision {
    /// Nothing to do and nothing to report.
    Ignore,
    /// Refused before any remote call; the error is shown to the user.
    Reject(ValidationError),
    Move {
        sources: Vec<String>,
        destination: String,
        destination_name: String,
    },
}

/// Decides what a drop of `raw_payload` onto the row `target` does.
///
/// Drops are ignored on files, in restricted views, without an item payload, or when the
/// target folder is itself being dragged. A payload from another scope is rejected.
pub fn decide_folder_drop(
    view: ViewMode,
    scope: FileScope,
    target: &FileItem,
    raw_payload: Option<&str>,
) -> DropDecision {
    if !target.is_dir() || view.is_restricted() {
        return DropDecision::Ignore;
    }
    let Some(raw) = raw_payload.filter(|raw| !raw.trim().is_empty()) else {
        return DropDecision::Ignore;
    };
    let Ok(payload) = DragPayload::from_json(raw) else {
        return DropDecision::Reject(ValidationError::InvalidDragPayload);
    };
    let destination = target.path();
    if payload.paths.is_empty() || payload.paths.iter().any(|path| path == destination) {
        return DropDecision::Ignore;
    }
    if payload.scope() != scope {
        return DropDecision::Reject(ValidationError::CrossScopeMove);
    }
    DropDecision::Move {
        sources: payload.paths,
        destination: destination.to_string(),
        destination_name: target.name().to_string(),
    }
}

/// Whether a drag advertising `types` is an OS file drag the page should accept.
pub fn accepts_native_files<S: AsRef<str>>(view: ViewMode, types: &[S]) -> bool {
    !view.is_restricted() && types.iter().any(|kind| kind.as_ref() == NATIVE_FILES_TYPE)
}
