//! Item and empty-space context menus.
//!
//! At most one menu is open at a time; both live in the single `FileManagerState::menu` slot,
//! so opening one replaces the other. Menu content is derived from the active view, the
//! selection size and the paste buffer.

use serde::{Deserialize, Serialize};

use crate::{
    model::{FileItem, FileManagerState, ItemId},
    reducer::ReducerError,
    view_mode::ViewMode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MenuPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuKind {
    /// Opened on an item row; acts on the selection.
    Item,
    /// Opened on the listing background.
    EmptySpace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMenu {
    pub kind: MenuKind,
    pub position: MenuPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    View,
    Download,
    SharePublic,
    ShareWithUsers,
    Copy,
    Cut,
    CopyPaths,
    Paste,
    Rename,
    MoveTo,
    Delete,
    Restore,
    DeletePermanently,
    RemoveFromList,
    Unshare,
    NewFile,
    NewFolder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub command: MenuCommand,
    pub label: String,
    pub destructive: bool,
}

impl MenuEntry {
    fn new(command: MenuCommand, label: impl Into<String>) -> Self {
        Self {
            command,
            label: label.into(),
            destructive: false,
        }
    }

    fn destructive(command: MenuCommand, label: impl Into<String>) -> Self {
        Self {
            command,
            label: label.into(),
            destructive: true,
        }
    }
}

/// Entries of the item menu for the current view and selection.
///
/// Empty when nothing is selected.
pub fn item_menu_entries(
    view: ViewMode,
    selection_count: usize,
    single_selected: Option<&FileItem>,
    has_clipboard: bool,
) -> Vec<MenuEntry> {
    use MenuCommand as C;

    if selection_count == 0 {
        return Vec::new();
    }
    let single_file = single_selected.is_some_and(|item| !item.is_dir());
    let mut entries = Vec::new();
    match view {
        ViewMode::Trash => {
            entries.push(MenuEntry::new(C::Restore, format!("Restore ({selection_count})")));
            entries.push(MenuEntry::destructive(
                C::DeletePermanently,
                format!("Delete Permanently ({selection_count})"),
            ));
        }
        ViewMode::SharedWithMe => {
            if single_file {
                entries.push(MenuEntry::new(C::View, "View"));
            }
            if single_selected.is_some() {
                entries.push(MenuEntry::new(C::Download, "Download"));
            }
            entries.push(MenuEntry::new(C::CopyPaths, "Copy Path(s)"));
            entries.push(MenuEntry::destructive(
                C::RemoveFromList,
                format!("Remove from list ({selection_count})"),
            ));
        }
        ViewMode::MyShares => {
            entries.push(MenuEntry::new(C::CopyPaths, "Copy Path(s)"));
            entries.push(MenuEntry::destructive(
                C::Unshare,
                format!("Unshare ({selection_count})"),
            ));
        }
        ViewMode::Directory => {
            if single_file {
                entries.push(MenuEntry::new(C::View, "View"));
            }
            entries.push(MenuEntry::new(C::SharePublic, "Share Public"));
            entries.push(MenuEntry::new(C::ShareWithUsers, "Share with Users"));
            entries.push(MenuEntry::new(C::Copy, "Copy"));
            entries.push(MenuEntry::new(C::Cut, "Cut"));
            entries.push(MenuEntry::new(C::CopyPaths, "Copy Path(s)"));
            if has_clipboard {
                entries.push(MenuEntry::new(C::Paste, "Paste"));
            }
            if single_selected.is_some() {
                entries.push(MenuEntry::new(C::Rename, "Rename"));
            }
            entries.push(MenuEntry::new(C::MoveTo, "Move To..."));
            entries.push(MenuEntry::destructive(
                C::Delete,
                format!("Delete ({selection_count})"),
            ));
        }
    }
    entries
}

/// Entries of the empty-space menu; only the directory view has one.
pub fn empty_space_entries(view: ViewMode, has_clipboard: bool) -> Vec<MenuEntry> {
    if view.is_restricted() {
        return Vec::new();
    }
    let mut entries = vec![
        MenuEntry::new(MenuCommand::NewFile, "New File"),
        MenuEntry::new(MenuCommand::NewFolder, "New Folder"),
    ];
    if has_clipboard {
        entries.push(MenuEntry::new(MenuCommand::Paste, "Paste"));
    }
    entries
}

/// Entries for whichever menu is open in `state`.
pub fn open_menu_entries(state: &FileManagerState) -> Vec<MenuEntry> {
    let has_clipboard = !state.clipboard.is_empty();
    match state.menu.map(|menu| menu.kind) {
        Some(MenuKind::Item) => item_menu_entries(
            state.view,
            state.selection.len(),
            state.single_selected(),
            has_clipboard,
        ),
        Some(MenuKind::EmptySpace) => empty_space_entries(state.view, has_clipboard),
        None => Vec::new(),
    }
}

/// Right-click on a row: collapse the selection onto the item unless it is already selected,
/// then open the item menu.
pub fn open_item_menu(
    state: &mut FileManagerState,
    id: &ItemId,
    position: MenuPosition,
) -> Result<(), ReducerError> {
    if state.find_item(id).is_none() {
        return Err(ReducerError::ItemNotFound);
    }
    state.menu = None;
    if !state.selection.contains(id) {
        state.selection.select_only(id.clone());
    }
    state.menu = Some(OpenMenu {
        kind: MenuKind::Item,
        position,
    });
    Ok(())
}

/// Right-click on the background: clear the selection and open the empty-space menu outside
/// restricted views. Events bubbled from child elements are ignored.
pub fn open_empty_space_menu(
    state: &mut FileManagerState,
    position: MenuPosition,
    target_is_background: bool,
) {
    if !target_is_background {
        return;
    }
    state.menu = None;
    state.selection.clear();
    if !state.view.is_restricted() {
        state.menu = Some(OpenMenu {
            kind: MenuKind::EmptySpace,
            position,
        });
    }
}

/// Keeps a measured menu inside the viewport, never above or left of the origin.
pub fn clamp_to_viewport(
    position: MenuPosition,
    menu_size: (i32, i32),
    viewport: (i32, i32),
) -> MenuPosition {
    let (width, height) = menu_size;
    let (viewport_width, viewport_height) = viewport;
    let x = if position.x + width > viewport_width {
        viewport_width - width
    } else {
        position.x
    };
    let y = if position.y + height > viewport_height {
        viewport_height - height
    } else {
        position.y
    };
    MenuPosition {
        x: x.max(0),
        y: y.max(0),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{
        tests::{dir_item, numbered_items, shared_item},
        Clipboard,
    };

    fn commands(entries: &[MenuEntry]) -> Vec<MenuCommand> {
        entries.iter().map(|entry| entry.command).collect()
    }

    #[test]
    fn directory_menu_depends_on_selection_and_buffer() {
        use MenuCommand as C;
        let file = dir_item("/a.txt", false);
        assert_eq!(
            commands(&item_menu_entries(ViewMode::Directory, 1, Some(&file), false)),
            vec![
                C::View,
                C::SharePublic,
                C::ShareWithUsers,
                C::Copy,
                C::Cut,
                C::CopyPaths,
                C::Rename,
                C::MoveTo,
                C::Delete
            ]
        );
        assert_eq!(
            commands(&item_menu_entries(ViewMode::Directory, 3, None, true)),
            vec![
                C::SharePublic,
                C::ShareWithUsers,
                C::Copy,
                C::Cut,
                C::CopyPaths,
                C::Paste,
                C::MoveTo,
                C::Delete
            ]
        );
        let folder = dir_item("/docs", true);
        assert!(!commands(&item_menu_entries(ViewMode::Directory, 1, Some(&folder), false))
            .contains(&C::View));
    }

    #[test]
    fn restricted_view_menus() {
        use MenuCommand as C;
        let shared = shared_item(4, "x.txt");
        assert_eq!(
            commands(&item_menu_entries(ViewMode::SharedWithMe, 1, Some(&shared), true)),
            vec![C::View, C::Download, C::CopyPaths, C::RemoveFromList]
        );
        assert_eq!(
            commands(&item_menu_entries(ViewMode::MyShares, 2, None, true)),
            vec![C::CopyPaths, C::Unshare]
        );
        let trash = item_menu_entries(ViewMode::Trash, 2, None, true);
        assert_eq!(commands(&trash), vec![C::Restore, C::DeletePermanently]);
        assert_eq!(trash[1].label, "Delete Permanently (2)");
        assert!(trash[1].destructive);
        assert!(item_menu_entries(ViewMode::Trash, 0, None, true).is_empty());
    }

    #[test]
    fn empty_space_menu_only_in_directory_view() {
        use MenuCommand as C;
        assert_eq!(
            commands(&empty_space_entries(ViewMode::Directory, true)),
            vec![C::NewFile, C::NewFolder, C::Paste]
        );
        assert!(empty_space_entries(ViewMode::MyShares, true).is_empty());
    }

    #[test]
    fn opening_one_menu_closes_the_other() {
        let mut state = FileManagerState {
            items: numbered_items(3),
            ..FileManagerState::default()
        };
        let id = ItemId::Path("/i1".to_string());
        open_item_menu(&mut state, &id, MenuPosition { x: 5, y: 6 }).expect("item menu");
        assert_eq!(state.menu.map(|menu| menu.kind), Some(MenuKind::Item));

        open_empty_space_menu(&mut state, MenuPosition { x: 50, y: 60 }, true);
        assert_eq!(
            state.menu,
            Some(OpenMenu {
                kind: MenuKind::EmptySpace,
                position: MenuPosition { x: 50, y: 60 },
            })
        );
        assert!(state.selection.is_empty());
    }

    #[test]
    fn right_click_keeps_multi_selection_when_target_is_selected() {
        let mut state = FileManagerState {
            items: numbered_items(4),
            ..FileManagerState::default()
        };
        let displayed = state.displayed_ids();
        state.selection.select_all(&displayed);

        open_item_menu(&mut state, &displayed[2], MenuPosition::default()).expect("menu");
        assert_eq!(state.selection.len(), 4);

        state.selection.select_only(displayed[0].clone());
        open_item_menu(&mut state, &displayed[3], MenuPosition::default()).expect("menu");
        assert_eq!(state.selection.ids().collect::<Vec<_>>(), vec![&displayed[3]]);
        assert_eq!(state.selection.anchor(), Some(&displayed[3]));
    }

    #[test]
    fn bubbled_background_events_and_restricted_views_open_nothing() {
        let mut state = FileManagerState {
            clipboard: Clipboard::Copy {
                paths: vec!["/a".to_string()],
                scope: platform_host::FileScope::Home,
            },
            ..FileManagerState::default()
        };
        open_empty_space_menu(&mut state, MenuPosition::default(), false);
        assert_eq!(state.menu, None);

        state.view = ViewMode::Trash;
        open_empty_space_menu(&mut state, MenuPosition::default(), true);
        assert_eq!(state.menu, None);
    }

    #[test]
    fn unknown_row_is_an_error() {
        let mut state = FileManagerState::default();
        assert_eq!(
            open_item_menu(
                &mut state,
                &ItemId::Path("/gone".to_string()),
                MenuPosition::default()
            ),
            Err(ReducerError::ItemNotFound)
        );
    }

    #[test]
    fn menus_are_clamped_inside_the_viewport() {
        assert_eq!(
            clamp_to_viewport(MenuPosition { x: 780, y: 580 }, (200, 150), (800, 600)),
            MenuPosition { x: 600, y: 450 }
        );
        assert_eq!(
            clamp_to_viewport(MenuPosition { x: 10, y: 20 }, (200, 150), (800, 600)),
            MenuPosition { x: 10, y: 20 }
        );
        assert_eq!(
            clamp_to_viewport(MenuPosition { x: 90, y: 90 }, (200, 150), (100, 100)),
            MenuPosition { x: 0, y: 0 }
        );
    }
}
