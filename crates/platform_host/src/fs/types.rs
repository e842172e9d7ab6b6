//! File-manager wire models shared across host contracts and implementations.

use serde::{Deserialize, Serialize};

/// Path token for the trash view.
pub const TRASH_VIEW_TOKEN: &str = "trash";
/// Path token for the shared-with-me view.
pub const SHARED_WITH_ME_VIEW_TOKEN: &str = "shared-with-me";
/// Path token for the my-shares view.
pub const MY_SHARES_VIEW_TOKEN: &str = "my-shares";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Entry kind as reported by the backend (`"file"` or `"dir"`).
pub enum FileKind {
    /// Regular file.
    File,
    /// Directory.
    Dir,
}

impl FileKind {
    /// Returns `true` for directories.
    pub const fn is_dir(self) -> bool {
        matches!(self, Self::Dir)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
/// Browsing scope for path-addressed operations.
///
/// `SystemRoot` is the admin-only elevated mode rooted outside the user's home directory. It is
/// sent to the backend as the boolean `system_root_access`.
pub enum FileScope {
    /// The signed-in user's home directory.
    #[default]
    Home,
    /// Admin system-root browsing.
    SystemRoot,
}

impl FileScope {
    /// Builds a scope from the wire boolean.
    pub const fn from_system_root_access(system_root_access: bool) -> Self {
        if system_root_access {
            Self::SystemRoot
        } else {
            Self::Home
        }
    }

    /// Returns the wire boolean for this scope.
    pub const fn system_root_access(self) -> bool {
        matches!(self, Self::SystemRoot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One entry of a normal directory listing.
pub struct DirectoryEntry {
    /// Base name.
    pub name: String,
    /// Absolute path inside the active scope; unique within a listing.
    pub path: String,
    /// File or directory.
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// ISO-8601 modification time.
    #[serde(default)]
    pub modified_at: String,
    /// Whether the entry (or an ancestor) is shared with another user.
    #[serde(default)]
    pub is_shared: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One entry of the trash listing.
pub struct TrashEntry {
    /// Original base name.
    pub name: String,
    /// Backend-generated trash key; unique per trash entry.
    pub trashed_name: String,
    /// Path the entry was deleted from.
    pub original_path: String,
    /// ISO-8601 deletion time.
    #[serde(default)]
    pub deleted_at: String,
    /// File or directory.
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A share record another user created for the signed-in user.
pub struct SharedWithMeEntry {
    /// Share record id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Path relative to the sharer's home; opaque to the client.
    pub path: String,
    /// File or directory.
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// ISO-8601 modification time of the shared target.
    #[serde(default)]
    pub modified_at: String,
    /// Username of the sharer.
    pub sharer_name: String,
    /// ISO-8601 share time.
    #[serde(default)]
    pub shared_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A share record the signed-in user created for someone else.
pub struct MyShareEntry {
    /// Share record id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Path relative to the signed-in user's home.
    pub path: String,
    /// File or directory.
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// ISO-8601 modification time of the shared target.
    #[serde(default)]
    pub modified_at: String,
    /// Username of the recipient.
    pub recipient_name: String,
    /// ISO-8601 share time.
    #[serde(default)]
    pub shared_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A user account as listed for share-recipient selection.
pub struct UserAccount {
    /// User id.
    pub id: u64,
    /// Login name.
    pub username: String,
    /// Role label (`"admin"` or `"user"`).
    #[serde(default)]
    pub role: String,
}

impl UserAccount {
    /// Returns `true` for admin accounts.
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One entry of a ZIP archive listing returned by the content endpoint.
pub struct ZipEntry {
    /// Member path inside the archive.
    pub name: String,
    /// Whether the member is a directory.
    #[serde(default)]
    pub is_dir: bool,
    /// Uncompressed size in bytes.
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Preview content fetched through the content endpoints.
pub enum FileContent {
    /// UTF-8 text body.
    Text(String),
    /// Archive member listing.
    ZipListing(Vec<ZipEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Addressing for preview and download requests.
pub enum ContentSource {
    /// A path in the signed-in user's own tree.
    Path {
        /// Absolute path.
        path: String,
        /// Scope the path belongs to.
        scope: FileScope,
    },
    /// A share record visible to the signed-in user.
    Share {
        /// Share record id.
        share_id: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A file picked or dropped by the user, read into memory for upload.
pub struct UploadFile {
    /// Original file name.
    pub name: String,
    /// File bytes.
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn directory_entry_reads_backend_listing_shape() {
        let raw = json!({
            "name": "notes.txt",
            "path": "/docs/notes.txt",
            "type": "file",
            "size": 42,
            "modified_at": "2024-05-01T10:00:00",
            "is_shared": true
        });

        let entry: DirectoryEntry = serde_json::from_value(raw).expect("deserialize");
        assert_eq!(entry.kind, FileKind::File);
        assert_eq!(entry.path, "/docs/notes.txt");
        assert!(entry.is_shared);
    }

    #[test]
    fn trash_entry_tolerates_missing_optional_fields() {
        let raw = json!({
            "name": "old",
            "trashed_name": "c6f1",
            "original_path": "/old",
            "type": "dir"
        });

        let entry: TrashEntry = serde_json::from_value(raw).expect("deserialize");
        assert_eq!(entry.kind, FileKind::Dir);
        assert_eq!(entry.size, 0);
        assert!(entry.deleted_at.is_empty());
    }

    #[test]
    fn scope_maps_to_wire_boolean() {
        assert!(FileScope::SystemRoot.system_root_access());
        assert!(!FileScope::Home.system_root_access());
        assert_eq!(FileScope::from_system_root_access(true), FileScope::SystemRoot);
        assert_eq!(
            serde_json::to_string(&FileKind::Dir).expect("serialize"),
            "\"dir\""
        );
    }
}
