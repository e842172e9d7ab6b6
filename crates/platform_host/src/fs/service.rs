//! Remote file-manager gateway contract.

use std::{future::Future, pin::Pin};

use super::{
    error::GatewayError,
    types::{
        ContentSource, DirectoryEntry, FileContent, FileKind, FileScope, MyShareEntry,
        SharedWithMeEntry, TrashEntry, UploadFile, UserAccount,
    },
};

/// Object-safe boxed future used by [`FileGateway`] async methods.
pub type FileGatewayFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Result alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Host service for the backend's file, trash and share endpoints.
///
/// Identifiers passed to trash and share operations are the view-scoped identifiers
/// (`trashed_name`, share `id`), never filesystem paths.
pub trait FileGateway {
    /// Returns the signed-in account.
    fn current_user<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<UserAccount>>;

    /// Lists accounts other than the signed-in one.
    fn list_users<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<Vec<UserAccount>>>;

    /// Lists a directory in the given scope.
    fn list_directory<'a>(
        &'a self,
        path: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<Vec<DirectoryEntry>>>;

    /// Lists the signed-in user's trash.
    fn list_trash<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<Vec<TrashEntry>>>;

    /// Lists share records other users created for the signed-in user.
    fn list_shared_with_me<'a>(
        &'a self,
    ) -> FileGatewayFuture<'a, GatewayResult<Vec<SharedWithMeEntry>>>;

    /// Lists share records the signed-in user created.
    fn list_my_shares<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<Vec<MyShareEntry>>>;

    /// Creates an empty file or directory named `name` inside `parent`.
    fn create_item<'a>(
        &'a self,
        parent: &'a str,
        name: &'a str,
        kind: FileKind,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>>;

    /// Uploads one file into `destination`.
    fn upload<'a>(
        &'a self,
        file: &'a UploadFile,
        destination: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>>;

    /// Moves `sources` into `destination`.
    fn move_items<'a>(
        &'a self,
        sources: &'a [String],
        destination: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>>;

    /// Copies `sources` into `destination`.
    fn copy_items<'a>(
        &'a self,
        sources: &'a [String],
        destination: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>>;

    /// Renames the entry at `path` to `new_name`.
    fn rename<'a>(
        &'a self,
        path: &'a str,
        new_name: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>>;

    /// Moves entries to the trash.
    fn trash_items<'a>(
        &'a self,
        paths: &'a [String],
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>>;

    /// Permanently deletes trash entries by `trashed_name`.
    fn delete_permanently<'a>(
        &'a self,
        trashed_names: &'a [String],
    ) -> FileGatewayFuture<'a, GatewayResult<()>>;

    /// Restores trash entries by `trashed_name`.
    fn restore<'a>(
        &'a self,
        trashed_names: &'a [String],
    ) -> FileGatewayFuture<'a, GatewayResult<()>>;

    /// Permanently deletes every trash entry.
    fn empty_trash<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<()>>;

    /// Deletes user share records by id. Original files are untouched.
    fn unshare<'a>(&'a self, share_ids: &'a [u64]) -> FileGatewayFuture<'a, GatewayResult<()>>;

    /// Creates a public link share and returns its token.
    fn create_public_share<'a>(
        &'a self,
        paths: &'a [String],
        name: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<String>>;

    /// Revokes a public link share.
    fn delete_public_share<'a>(&'a self, token: &'a str)
        -> FileGatewayFuture<'a, GatewayResult<()>>;

    /// Shares `paths` with the given user ids.
    fn share_with_users<'a>(
        &'a self,
        paths: &'a [String],
        user_ids: &'a [u64],
    ) -> FileGatewayFuture<'a, GatewayResult<()>>;

    /// Fetches text or archive-listing content for the preview pane.
    fn file_content<'a>(
        &'a self,
        source: &'a ContentSource,
    ) -> FileGatewayFuture<'a, GatewayResult<FileContent>>;

    /// Fetches raw bytes for media preview.
    fn view_file<'a>(
        &'a self,
        source: &'a ContentSource,
    ) -> FileGatewayFuture<'a, GatewayResult<Vec<u8>>>;

    /// Fetches a shared file for saving to disk.
    fn download_shared<'a>(&'a self, share_id: u64)
        -> FileGatewayFuture<'a, GatewayResult<Vec<u8>>>;

    /// Returns a direct download URL for `source`, when the host can address one.
    fn download_url(&self, source: &ContentSource) -> Option<String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op gateway for unsupported targets and baseline tests.
///
/// Listings are empty and every mutation fails with [`GatewayError::Unsupported`].
pub struct NoopFileGateway;

fn unsupported<'a, T: 'a>(op: &'static str) -> FileGatewayFuture<'a, GatewayResult<T>> {
    Box::pin(async move { Err(GatewayError::Unsupported(op)) })
}

impl FileGateway for NoopFileGateway {
    fn current_user<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<UserAccount>> {
        unsupported("current_user")
    }

    fn list_users<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<Vec<UserAccount>>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn list_directory<'a>(
        &'a self,
        _path: &'a str,
        _scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<Vec<DirectoryEntry>>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn list_trash<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<Vec<TrashEntry>>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn list_shared_with_me<'a>(
        &'a self,
    ) -> FileGatewayFuture<'a, GatewayResult<Vec<SharedWithMeEntry>>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn list_my_shares<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<Vec<MyShareEntry>>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn create_item<'a>(
        &'a self,
        _parent: &'a str,
        _name: &'a str,
        _kind: FileKind,
        _scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        unsupported("create_item")
    }

    fn upload<'a>(
        &'a self,
        _file: &'a UploadFile,
        _destination: &'a str,
        _scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        unsupported("upload")
    }

    fn move_items<'a>(
        &'a self,
        _sources: &'a [String],
        _destination: &'a str,
        _scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        unsupported("move_items")
    }

    fn copy_items<'a>(
        &'a self,
        _sources: &'a [String],
        _destination: &'a str,
        _scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        unsupported("copy_items")
    }

    fn rename<'a>(
        &'a self,
        _path: &'a str,
        _new_name: &'a str,
        _scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        unsupported("rename")
    }

    fn trash_items<'a>(
        &'a self,
        _paths: &'a [String],
        _scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        unsupported("trash_items")
    }

    fn delete_permanently<'a>(
        &'a self,
        _trashed_names: &'a [String],
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        unsupported("delete_permanently")
    }

    fn restore<'a>(
        &'a self,
        _trashed_names: &'a [String],
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        unsupported("restore")
    }

    fn empty_trash<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<()>> {
        unsupported("empty_trash")
    }

    fn unshare<'a>(&'a self, _share_ids: &'a [u64]) -> FileGatewayFuture<'a, GatewayResult<()>> {
        unsupported("unshare")
    }

    fn create_public_share<'a>(
        &'a self,
        _paths: &'a [String],
        _name: &'a str,
        _scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<String>> {
        unsupported("create_public_share")
    }

    fn delete_public_share<'a>(
        &'a self,
        _token: &'a str,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        unsupported("delete_public_share")
    }

    fn share_with_users<'a>(
        &'a self,
        _paths: &'a [String],
        _user_ids: &'a [u64],
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        unsupported("share_with_users")
    }

    fn file_content<'a>(
        &'a self,
        _source: &'a ContentSource,
    ) -> FileGatewayFuture<'a, GatewayResult<FileContent>> {
        unsupported("file_content")
    }

    fn view_file<'a>(
        &'a self,
        _source: &'a ContentSource,
    ) -> FileGatewayFuture<'a, GatewayResult<Vec<u8>>> {
        unsupported("view_file")
    }

    fn download_shared<'a>(
        &'a self,
        _share_id: u64,
    ) -> FileGatewayFuture<'a, GatewayResult<Vec<u8>>> {
        unsupported("download_shared")
    }

    fn download_url(&self, _source: &ContentSource) -> Option<String> {
        None
    }
}
