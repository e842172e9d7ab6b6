use std::collections::BTreeSet;

use platform_host::{
    ContentSource, DirectoryEntry, FileKind, FileScope, MyShareEntry, SharedWithMeEntry,
    TrashEntry, UserAccount,
};
use serde::{Deserialize, Serialize};

use crate::{
    context_menu::OpenMenu,
    listing::{self, ListingQuery},
    preview::{PreviewKind, PreviewState},
    selection::Selection,
    toast::ToastQueue,
    view_mode::ViewMode,
};

pub use crate::toast::{Toast, ToastLevel};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ItemId {
    Path(String),
    TrashedName(String),
    Share(u64),
}

impl ItemId {
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Self::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_trashed_name(&self) -> Option<&str> {
        match self {
            Self::TrashedName(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_share_id(&self) -> Option<u64> {
        match self {
            Self::Share(id) => Some(*id),
            _ => None,
        }
    }

    /// Stable key for keyed list rendering.
    pub fn render_key(&self) -> String {
        match self {
            Self::Path(path) => format!("path:{path}"),
            Self::TrashedName(name) => format!("trash:{name}"),
            Self::Share(id) => format!("share:{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileItem {
    Directory(DirectoryEntry),
    Trash(TrashEntry),
    SharedWithMe(SharedWithMeEntry),
    MyShare(MyShareEntry),
}

impl FileItem {
    pub fn id(&self) -> ItemId {
        match self {
            Self::Directory(entry) => ItemId::Path(entry.path.clone()),
            Self::Trash(entry) => ItemId::TrashedName(entry.trashed_name.clone()),
            Self::SharedWithMe(entry) => ItemId::Share(entry.id),
            Self::MyShare(entry) => ItemId::Share(entry.id),
        }
    }

    pub fn view(&self) -> ViewMode {
        match self {
            Self::Directory(_) => ViewMode::Directory,
            Self::Trash(_) => ViewMode::Trash,
            Self::SharedWithMe(_) => ViewMode::SharedWithMe,
            Self::MyShare(_) => ViewMode::MyShares,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Directory(entry) => &entry.name,
            Self::Trash(entry) => &entry.name,
            Self::SharedWithMe(entry) => &entry.name,
            Self::MyShare(entry) => &entry.name,
        }
    }

    pub fn kind(&self) -> FileKind {
        match self {
            Self::Directory(entry) => entry.kind,
            Self::Trash(entry) => entry.kind,
            Self::SharedWithMe(entry) => entry.kind,
            Self::MyShare(entry) => entry.kind,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind().is_dir()
    }

    pub fn size(&self) -> u64 {
        match self {
            Self::Directory(entry) => entry.size,
            Self::Trash(entry) => entry.size,
            Self::SharedWithMe(entry) => entry.size,
            Self::MyShare(entry) => entry.size,
        }
    }

    /// Path-like field: the live path, or the original path of a trashed entry.
    pub fn path(&self) -> &str {
        match self {
            Self::Directory(entry) => &entry.path,
            Self::Trash(entry) => &entry.original_path,
            Self::SharedWithMe(entry) => &entry.path,
            Self::MyShare(entry) => &entry.path,
        }
    }

    /// Timestamp shown in, and sorted by, the "modified" column.
    pub fn timestamp(&self) -> &str {
        match self {
            Self::Directory(entry) => &entry.modified_at,
            Self::Trash(entry) => &entry.deleted_at,
            Self::SharedWithMe(entry) => &entry.shared_at,
            Self::MyShare(entry) => &entry.shared_at,
        }
    }

    /// Line written to the system clipboard by "Copy Path(s)".
    pub fn clipboard_line(&self) -> String {
        match self {
            Self::Directory(entry) => entry.path.clone(),
            Self::Trash(entry) => entry.original_path.clone(),
            Self::SharedWithMe(entry) => format!("{}:{}", entry.sharer_name, entry.path),
            Self::MyShare(entry) => format!("{}:{}", entry.recipient_name, entry.path),
        }
    }

    /// Addressing for preview and download, scoped to where the item was listed.
    pub fn content_source(&self, scope: FileScope) -> Option<ContentSource> {
        match self {
            Self::Directory(entry) => Some(ContentSource::Path {
                path: entry.path.clone(),
                scope,
            }),
            Self::SharedWithMe(entry) => Some(ContentSource::Share { share_id: entry.id }),
            Self::MyShare(entry) => Some(ContentSource::Path {
                path: entry.path.clone(),
                scope: FileScope::Home,
            }),
            Self::Trash(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Clipboard {
    #[default]
    Empty,
    Copy {
        paths: Vec<String>,
        scope: FileScope,
    },
    Cut {
        paths: Vec<String>,
        scope: FileScope,
    },
}

impl Clipboard {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Copy { paths, .. } | Self::Cut { paths, .. } => paths.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A remote mutation, carrying view-scoped identifiers for trash and share operations.
pub enum Mutation {
    Create {
        parent: String,
        name: String,
        kind: FileKind,
    },
    Rename {
        path: String,
        new_name: String,
    },
    Move {
        sources: Vec<String>,
        destination: String,
    },
    Copy {
        sources: Vec<String>,
        destination: String,
    },
    Trash {
        paths: Vec<String>,
    },
    DeletePermanently {
        trashed_names: Vec<String>,
    },
    Restore {
        trashed_names: Vec<String>,
    },
    EmptyTrash,
    Unshare {
        share_ids: Vec<u64>,
    },
    ShareWithUsers {
        paths: Vec<String>,
        user_ids: Vec<u64>,
    },
}

impl Mutation {
    pub fn op(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Rename { .. } => "rename",
            Self::Move { .. } => "move",
            Self::Copy { .. } => "copy",
            Self::Trash { .. } => "trash",
            Self::DeletePermanently { .. } => "delete_permanently",
            Self::Restore { .. } => "restore",
            Self::EmptyTrash => "empty_trash",
            Self::Unshare { .. } => "unshare",
            Self::ShareWithUsers { .. } => "share_with_users",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Where a mutation was started from; decides what its completion updates.
pub enum MutationOrigin {
    /// Toolbar, context menu, drag-and-drop or a confirmed request.
    Direct,
    /// A modal form that shows failures inline and closes on success.
    Modal,
    /// Pasting the clipboard buffer, which is cleared on success.
    Paste,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    pub mutation: Mutation,
    pub scope: FileScope,
    pub origin: MutationOrigin,
    pub success: String,
    pub failure: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A destructive request held until the user confirms it.
pub struct PendingConfirmation {
    pub message: String,
    pub request: MutationRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Create {
        kind: FileKind,
        name: String,
    },
    Rename {
        path: String,
        original_name: String,
        name: String,
    },
    Move {
        paths: Vec<String>,
        destination: String,
    },
    SharePublic {
        paths: Vec<String>,
        name: String,
        token: Option<String>,
    },
    ShareWithUsers {
        paths: Vec<String>,
        users: Vec<UserAccount>,
        chosen: BTreeSet<u64>,
        loading: bool,
    },
    Viewer {
        item: FileItem,
        source: ContentSource,
        kind: PreviewKind,
        content: PreviewState,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalState {
    pub modal: Modal,
    pub error: Option<String>,
    pub busy: bool,
}

impl ModalState {
    pub fn new(modal: Modal) -> Self {
        Self {
            modal,
            error: None,
            busy: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileManagerState {
    /// Absolute directory path or virtual view token.
    pub location: String,
    pub view: ViewMode,
    pub scope: FileScope,
    pub user: Option<UserAccount>,
    pub items: Vec<FileItem>,
    pub loading: bool,
    pub load_error: Option<String>,
    /// Bumped for every listing request; older responses are dropped.
    pub generation: u64,
    pub selection: Selection,
    pub menu: Option<OpenMenu>,
    pub clipboard: Clipboard,
    pub query: ListingQuery,
    pub modal: Option<ModalState>,
    pub confirmation: Option<PendingConfirmation>,
    pub toasts: ToastQueue,
}

impl Default for FileManagerState {
    fn default() -> Self {
        Self {
            location: "/".to_string(),
            view: ViewMode::Directory,
            scope: FileScope::Home,
            user: None,
            items: Vec::new(),
            loading: false,
            load_error: None,
            generation: 0,
            selection: Selection::default(),
            menu: None,
            clipboard: Clipboard::Empty,
            query: ListingQuery::default(),
            modal: None,
            confirmation: None,
            toasts: ToastQueue::default(),
        }
    }
}

impl FileManagerState {
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserAccount::is_admin)
    }

    /// Items after search filtering and sorting, in on-screen order.
    pub fn display_items(&self) -> Vec<FileItem> {
        listing::apply(&self.items, &self.query)
    }

    pub fn displayed_ids(&self) -> Vec<ItemId> {
        self.display_items().iter().map(FileItem::id).collect()
    }

    pub fn find_item(&self, id: &ItemId) -> Option<&FileItem> {
        self.items.iter().find(|item| item.id() == *id)
    }

    /// Selected items in listing order.
    pub fn selected_items(&self) -> Vec<&FileItem> {
        self.items
            .iter()
            .filter(|item| self.selection.contains(&item.id()))
            .collect()
    }

    pub fn selected_paths(&self) -> Vec<String> {
        self.selected_items()
            .into_iter()
            .map(|item| item.path().to_string())
            .collect()
    }

    pub fn single_selected(&self) -> Option<&FileItem> {
        let mut selected = self.selected_items().into_iter();
        match (selected.next(), selected.next()) {
            (Some(item), None) => Some(item),
            _ => None,
        }
    }

    pub fn can_go_up(&self) -> bool {
        self.view == ViewMode::Directory && self.location != "/"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    /// A native OS file drag is over the page.
    pub dragging_files: bool,
    /// Folder row currently highlighted as a drop target.
    pub drop_target: Option<ItemId>,
}

#[cfg(test)]
pub(crate) mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    pub(crate) fn dir_item(path: &str, is_dir: bool) -> FileItem {
        FileItem::Directory(DirectoryEntry {
            name: platform_host::file_name(path).to_string(),
            path: path.to_string(),
            kind: if is_dir { FileKind::Dir } else { FileKind::File },
            size: 0,
            modified_at: String::new(),
            is_shared: false,
        })
    }

    pub(crate) fn trash_item(trashed_name: &str, original_path: &str) -> FileItem {
        FileItem::Trash(TrashEntry {
            name: platform_host::file_name(original_path).to_string(),
            trashed_name: trashed_name.to_string(),
            original_path: original_path.to_string(),
            deleted_at: String::new(),
            kind: FileKind::File,
            size: 0,
        })
    }

    pub(crate) fn shared_item(id: u64, path: &str) -> FileItem {
        FileItem::SharedWithMe(SharedWithMeEntry {
            id,
            name: platform_host::file_name(path).to_string(),
            path: path.to_string(),
            kind: FileKind::File,
            size: 0,
            modified_at: String::new(),
            sharer_name: "alice".to_string(),
            shared_at: String::new(),
        })
    }

    pub(crate) fn my_share_item(id: u64, path: &str) -> FileItem {
        FileItem::MyShare(MyShareEntry {
            id,
            name: platform_host::file_name(path).to_string(),
            path: path.to_string(),
            kind: FileKind::File,
            size: 0,
            modified_at: String::new(),
            recipient_name: "bob".to_string(),
            shared_at: String::new(),
        })
    }

    /// Directory listing `/i0 .. /i{count-1}`, all plain files.
    pub(crate) fn numbered_items(count: usize) -> Vec<FileItem> {
        (0..count)
            .map(|index| dir_item(&format!("/i{index}"), false))
            .collect()
    }

    #[test]
    fn clipboard_lines_prefix_the_counterpart_in_share_views() {
        assert_eq!(dir_item("/a/b.txt", false).clipboard_line(), "/a/b.txt");
        assert_eq!(shared_item(1, "docs/b.txt").clipboard_line(), "alice:docs/b.txt");
        assert_eq!(my_share_item(2, "docs/b.txt").clipboard_line(), "bob:docs/b.txt");
        assert_eq!(trash_item("b.txt_1", "/a/b.txt").clipboard_line(), "/a/b.txt");
    }

    #[test]
    fn selected_items_follow_listing_order() {
        let mut state = FileManagerState {
            items: numbered_items(4),
            ..FileManagerState::default()
        };
        let displayed = state.displayed_ids();
        state.selection.select_all(&displayed);

        assert_eq!(
            state.selected_paths(),
            vec!["/i0", "/i1", "/i2", "/i3"]
        );
        assert_eq!(state.single_selected(), None);
    }

    #[test]
    fn trashed_items_have_no_content_source() {
        assert_eq!(
            trash_item("x_1", "/x").content_source(FileScope::Home),
            None
        );
        assert_eq!(
            shared_item(9, "x").content_source(FileScope::SystemRoot),
            Some(ContentSource::Share { share_id: 9 })
        );
    }
}
