//! Resolution of the active view from the current location token.
//!
//! The location is either an absolute directory path or one of the virtual tokens for trash,
//! shared-with-me and my-shares. Exactly one [`ViewMode`] applies at a time, and item
//! identifiers are only meaningful inside the view that produced them.

use platform_host::{MY_SHARES_VIEW_TOKEN, SHARED_WITH_ME_VIEW_TOKEN, TRASH_VIEW_TOKEN};
use serde::{Deserialize, Serialize};

use crate::model::{FileItem, ItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// One of the four mutually exclusive file-manager views.
pub enum ViewMode {
    /// Regular directory browsing.
    #[default]
    Directory,
    /// Soft-deleted items.
    Trash,
    /// Items other users shared with the current user.
    SharedWithMe,
    /// Items the current user shared with others.
    MyShares,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Boolean view flags as consumed by rendering code. At most one is set.
pub struct ViewFlags {
    /// Trash view is active.
    pub is_trash_view: bool,
    /// Shared-with-me view is active.
    pub is_shared_with_me_view: bool,
    /// My-shares view is active.
    pub is_my_shares_view: bool,
}

impl ViewFlags {
    /// Whether the normal directory view applies.
    pub fn is_directory_view(self) -> bool {
        !(self.is_trash_view || self.is_shared_with_me_view || self.is_my_shares_view)
    }
}

impl ViewMode {
    /// Maps a location token to its view. Anything that is not a virtual token is a directory.
    pub fn resolve(location: &str) -> Self {
        match location {
            TRASH_VIEW_TOKEN => Self::Trash,
            SHARED_WITH_ME_VIEW_TOKEN => Self::SharedWithMe,
            MY_SHARES_VIEW_TOKEN => Self::MyShares,
            _ => Self::Directory,
        }
    }

    /// Location token for the virtual views, `None` for directories.
    pub fn token(self) -> Option<&'static str> {
        match self {
            Self::Directory => None,
            Self::Trash => Some(TRASH_VIEW_TOKEN),
            Self::SharedWithMe => Some(SHARED_WITH_ME_VIEW_TOKEN),
            Self::MyShares => Some(MY_SHARES_VIEW_TOKEN),
        }
    }

    pub fn flags(self) -> ViewFlags {
        ViewFlags {
            is_trash_view: self == Self::Trash,
            is_shared_with_me_view: self == Self::SharedWithMe,
            is_my_shares_view: self == Self::MyShares,
        }
    }

    /// Trash, shared-with-me and my-shares: no dragging, no pasting, no creating.
    pub fn is_restricted(self) -> bool {
        self != Self::Directory
    }

    /// Identifier of `item` within this view.
    ///
    /// Returns `None` for an item that belongs to a different view, so identifiers from two
    /// views can never end up in the same selection.
    pub fn item_identifier(self, item: &FileItem) -> Option<ItemId> {
        (item.view() == self).then(|| item.id())
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            Self::Directory => "This directory is empty.",
            Self::Trash => "Your trash is empty.",
            Self::SharedWithMe => "No files or folders have been shared with you.",
            Self::MyShares => "You haven't shared any files or folders yet.",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::tests::{dir_item, shared_item, trash_item};

    #[test]
    fn tokens_resolve_to_exactly_one_view() {
        for (location, expected) in [
            ("/", ViewMode::Directory),
            ("/docs/trash", ViewMode::Directory),
            ("trash", ViewMode::Trash),
            ("shared-with-me", ViewMode::SharedWithMe),
            ("my-shares", ViewMode::MyShares),
        ] {
            let view = ViewMode::resolve(location);
            assert_eq!(view, expected, "{location}");
            let flags = view.flags();
            let set = [
                flags.is_trash_view,
                flags.is_shared_with_me_view,
                flags.is_my_shares_view,
            ]
            .into_iter()
            .filter(|flag| *flag)
            .count();
            assert!(set <= 1);
            assert_eq!(flags.is_directory_view(), set == 0);
        }
    }

    #[test]
    fn token_round_trips_through_resolve() {
        for view in [ViewMode::Trash, ViewMode::SharedWithMe, ViewMode::MyShares] {
            assert_eq!(ViewMode::resolve(view.token().expect("token")), view);
        }
        assert_eq!(ViewMode::Directory.token(), None);
    }

    #[test]
    fn identifiers_are_scoped_to_their_view() {
        let directory = dir_item("/a/report.txt", false);
        let trashed = trash_item("report.txt_1700000000", "/a/report.txt");
        let shared = shared_item(7, "/a/report.txt");

        assert_eq!(
            ViewMode::Directory.item_identifier(&directory),
            Some(ItemId::Path("/a/report.txt".to_string()))
        );
        assert_eq!(
            ViewMode::Trash.item_identifier(&trashed),
            Some(ItemId::TrashedName("report.txt_1700000000".to_string()))
        );
        assert_eq!(
            ViewMode::SharedWithMe.item_identifier(&shared),
            Some(ItemId::Share(7))
        );
        assert_eq!(ViewMode::Trash.item_identifier(&directory), None);
        assert_eq!(ViewMode::Directory.item_identifier(&shared), None);
    }
}
