//! In-memory gateway that records every call, used by runtime tests and local previews.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    rc::Rc,
};

use super::{
    error::GatewayError,
    service::{FileGateway, FileGatewayFuture, GatewayResult},
    types::{
        ContentSource, DirectoryEntry, FileContent, FileKind, FileScope, MyShareEntry,
        SharedWithMeEntry, TrashEntry, UploadFile, UserAccount,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One recorded gateway request.
pub enum GatewayCall {
    /// `current_user`.
    CurrentUser,
    /// `list_users`.
    ListUsers,
    /// `list_directory`.
    ListDirectory {
        /// Listed path.
        path: String,
        /// Listed scope.
        scope: FileScope,
    },
    /// `list_trash`.
    ListTrash,
    /// `list_shared_with_me`.
    ListSharedWithMe,
    /// `list_my_shares`.
    ListMyShares,
    /// `create_item`.
    Create {
        /// Parent directory.
        parent: String,
        /// New entry name.
        name: String,
        /// New entry kind.
        kind: FileKind,
        /// Scope.
        scope: FileScope,
    },
    /// `upload`.
    Upload {
        /// Uploaded file name.
        name: String,
        /// Destination directory.
        destination: String,
        /// Scope.
        scope: FileScope,
    },
    /// `move_items`.
    Move {
        /// Source paths.
        sources: Vec<String>,
        /// Destination directory.
        destination: String,
        /// Scope.
        scope: FileScope,
    },
    /// `copy_items`.
    Copy {
        /// Source paths.
        sources: Vec<String>,
        /// Destination directory.
        destination: String,
        /// Scope.
        scope: FileScope,
    },
    /// `rename`.
    Rename {
        /// Renamed path.
        path: String,
        /// New base name.
        new_name: String,
        /// Scope.
        scope: FileScope,
    },
    /// `trash_items`.
    Trash {
        /// Trashed paths.
        paths: Vec<String>,
        /// Scope.
        scope: FileScope,
    },
    /// `delete_permanently`.
    DeletePermanently(Vec<String>),
    /// `restore`.
    Restore(Vec<String>),
    /// `empty_trash`.
    EmptyTrash,
    /// `unshare`.
    Unshare(Vec<u64>),
    /// `create_public_share`.
    CreatePublicShare {
        /// Shared paths.
        paths: Vec<String>,
        /// Share name.
        name: String,
        /// Scope.
        scope: FileScope,
    },
    /// `delete_public_share`.
    DeletePublicShare(String),
    /// `share_with_users`.
    ShareWithUsers {
        /// Shared paths.
        paths: Vec<String>,
        /// Recipient ids.
        user_ids: Vec<u64>,
    },
    /// `file_content`.
    FileContent(ContentSource),
    /// `view_file`.
    ViewFile(ContentSource),
    /// `download_shared`.
    DownloadShared(u64),
}

impl GatewayCall {
    /// Returns the operation name used to key scripted failures.
    pub const fn op(&self) -> &'static str {
        match self {
            Self::CurrentUser => "current_user",
            Self::ListUsers => "list_users",
            Self::ListDirectory { .. } => "list_directory",
            Self::ListTrash => "list_trash",
            Self::ListSharedWithMe => "list_shared_with_me",
            Self::ListMyShares => "list_my_shares",
            Self::Create { .. } => "create_item",
            Self::Upload { .. } => "upload",
            Self::Move { .. } => "move_items",
            Self::Copy { .. } => "copy_items",
            Self::Rename { .. } => "rename",
            Self::Trash { .. } => "trash_items",
            Self::DeletePermanently(_) => "delete_permanently",
            Self::Restore(_) => "restore",
            Self::EmptyTrash => "empty_trash",
            Self::Unshare(_) => "unshare",
            Self::CreatePublicShare { .. } => "create_public_share",
            Self::DeletePublicShare(_) => "delete_public_share",
            Self::ShareWithUsers { .. } => "share_with_users",
            Self::FileContent(_) => "file_content",
            Self::ViewFile(_) => "view_file",
            Self::DownloadShared(_) => "download_shared",
        }
    }

    /// Returns `true` for listing requests.
    pub const fn is_listing(&self) -> bool {
        matches!(
            self,
            Self::ListDirectory { .. }
                | Self::ListTrash
                | Self::ListSharedWithMe
                | Self::ListMyShares
        )
    }
}

#[derive(Debug, Default)]
struct MemoryGatewayState {
    user: Option<UserAccount>,
    users: Vec<UserAccount>,
    directories: BTreeMap<(FileScope, String), Vec<DirectoryEntry>>,
    trash: Vec<TrashEntry>,
    shared_with_me: Vec<SharedWithMeEntry>,
    my_shares: Vec<MyShareEntry>,
    contents: HashMap<String, FileContent>,
    calls: Vec<GatewayCall>,
    failures: HashMap<&'static str, GatewayError>,
    upload_failures: HashMap<String, GatewayError>,
    next_token: u64,
}

#[derive(Debug, Clone, Default)]
/// In-memory [`FileGateway`] with seeded listings, call recording and scripted failures.
///
/// Mutations are recorded but do not rewrite the seeded listings; tests assert on
/// [`MemoryFileGateway::calls`] and reseed listings when they need a changed view.
pub struct MemoryFileGateway {
    inner: Rc<RefCell<MemoryGatewayState>>,
}

impl MemoryFileGateway {
    /// Sets the account returned by `current_user`.
    pub fn set_current_user(&self, user: UserAccount) {
        self.inner.borrow_mut().user = Some(user);
    }

    /// Sets the accounts returned by `list_users`.
    pub fn set_users(&self, users: Vec<UserAccount>) {
        self.inner.borrow_mut().users = users;
    }

    /// Seeds the listing for one directory.
    pub fn set_directory(&self, scope: FileScope, path: &str, entries: Vec<DirectoryEntry>) {
        self.inner
            .borrow_mut()
            .directories
            .insert((scope, path.to_string()), entries);
    }

    /// Seeds the trash listing.
    pub fn set_trash(&self, entries: Vec<TrashEntry>) {
        self.inner.borrow_mut().trash = entries;
    }

    /// Seeds the shared-with-me listing.
    pub fn set_shared_with_me(&self, entries: Vec<SharedWithMeEntry>) {
        self.inner.borrow_mut().shared_with_me = entries;
    }

    /// Seeds the my-shares listing.
    pub fn set_my_shares(&self, entries: Vec<MyShareEntry>) {
        self.inner.borrow_mut().my_shares = entries;
    }

    /// Seeds preview content for a path.
    pub fn set_content(&self, path: &str, content: FileContent) {
        self.inner
            .borrow_mut()
            .contents
            .insert(path.to_string(), content);
    }

    /// Makes every later call of operation `op` fail with `error`.
    pub fn fail(&self, op: &'static str, error: GatewayError) {
        self.inner.borrow_mut().failures.insert(op, error);
    }

    /// Makes uploads of the named file fail with `error`.
    pub fn fail_upload(&self, file_name: &str, error: GatewayError) {
        self.inner
            .borrow_mut()
            .upload_failures
            .insert(file_name.to_string(), error);
    }

    /// Clears every scripted failure.
    pub fn clear_failures(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.failures.clear();
        inner.upload_failures.clear();
    }

    /// Returns a snapshot of the recorded calls.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.inner.borrow().calls.clone()
    }

    /// Returns recorded calls excluding listings.
    pub fn mutation_calls(&self) -> Vec<GatewayCall> {
        self.inner
            .borrow()
            .calls
            .iter()
            .filter(|call| !call.is_listing())
            .cloned()
            .collect()
    }

    /// Returns how many listing requests were recorded.
    pub fn listing_count(&self) -> usize {
        self.inner
            .borrow()
            .calls
            .iter()
            .filter(|call| call.is_listing())
            .count()
    }

    /// Forgets recorded calls.
    pub fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    fn record(&self, call: GatewayCall) -> GatewayResult<()> {
        let mut inner = self.inner.borrow_mut();
        let op = call.op();
        let upload_failure = match &call {
            GatewayCall::Upload { name, .. } => inner.upload_failures.get(name).cloned(),
            _ => None,
        };
        inner.calls.push(call);
        if let Some(err) = upload_failure {
            return Err(err);
        }
        match inner.failures.get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn ready<'a, T: 'a>(
        &self,
        call: GatewayCall,
        value: impl FnOnce(&Self) -> T,
    ) -> FileGatewayFuture<'a, GatewayResult<T>> {
        let result = self.record(call).map(|()| value(self));
        Box::pin(async move { result })
    }
}

impl FileGateway for MemoryFileGateway {
    fn current_user<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<UserAccount>> {
        let result = self.record(GatewayCall::CurrentUser).and_then(|()| {
            self.inner
                .borrow()
                .user
                .clone()
                .ok_or(GatewayError::Remote {
                    status: 401,
                    message: Some("Not logged in".to_string()),
                })
        });
        Box::pin(async move { result })
    }

    fn list_users<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<Vec<UserAccount>>> {
        self.ready(GatewayCall::ListUsers, |gw| gw.inner.borrow().users.clone())
    }

    fn list_directory<'a>(
        &'a self,
        path: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<Vec<DirectoryEntry>>> {
        let call = GatewayCall::ListDirectory {
            path: path.to_string(),
            scope,
        };
        let result = self.record(call).and_then(|()| {
            self.inner
                .borrow()
                .directories
                .get(&(scope, path.to_string()))
                .cloned()
                .ok_or_else(|| GatewayError::remote(404, "Directory not found"))
        });
        Box::pin(async move { result })
    }

    fn list_trash<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<Vec<TrashEntry>>> {
        self.ready(GatewayCall::ListTrash, |gw| gw.inner.borrow().trash.clone())
    }

    fn list_shared_with_me<'a>(
        &'a self,
    ) -> FileGatewayFuture<'a, GatewayResult<Vec<SharedWithMeEntry>>> {
        self.ready(GatewayCall::ListSharedWithMe, |gw| {
            gw.inner.borrow().shared_with_me.clone()
        })
    }

    fn list_my_shares<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<Vec<MyShareEntry>>> {
        self.ready(GatewayCall::ListMyShares, |gw| {
            gw.inner.borrow().my_shares.clone()
        })
    }

    fn create_item<'a>(
        &'a self,
        parent: &'a str,
        name: &'a str,
        kind: FileKind,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        self.ready(
            GatewayCall::Create {
                parent: parent.to_string(),
                name: name.to_string(),
                kind,
                scope,
            },
            |_| (),
        )
    }

    fn upload<'a>(
        &'a self,
        file: &'a UploadFile,
        destination: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        self.ready(
            GatewayCall::Upload {
                name: file.name.clone(),
                destination: destination.to_string(),
                scope,
            },
            |_| (),
        )
    }

    fn move_items<'a>(
        &'a self,
        sources: &'a [String],
        destination: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        self.ready(
            GatewayCall::Move {
                sources: sources.to_vec(),
                destination: destination.to_string(),
                scope,
            },
            |_| (),
        )
    }

    fn copy_items<'a>(
        &'a self,
        sources: &'a [String],
        destination: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        self.ready(
            GatewayCall::Copy {
                sources: sources.to_vec(),
                destination: destination.to_string(),
                scope,
            },
            |_| (),
        )
    }

    fn rename<'a>(
        &'a self,
        path: &'a str,
        new_name: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        self.ready(
            GatewayCall::Rename {
                path: path.to_string(),
                new_name: new_name.to_string(),
                scope,
            },
            |_| (),
        )
    }

    fn trash_items<'a>(
        &'a self,
        paths: &'a [String],
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        self.ready(
            GatewayCall::Trash {
                paths: paths.to_vec(),
                scope,
            },
            |_| (),
        )
    }

    fn delete_permanently<'a>(
        &'a self,
        trashed_names: &'a [String],
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        self.ready(GatewayCall::DeletePermanently(trashed_names.to_vec()), |_| ())
    }

    fn restore<'a>(
        &'a self,
        trashed_names: &'a [String],
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        self.ready(GatewayCall::Restore(trashed_names.to_vec()), |_| ())
    }

    fn empty_trash<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<()>> {
        self.ready(GatewayCall::EmptyTrash, |_| ())
    }

    fn unshare<'a>(&'a self, share_ids: &'a [u64]) -> FileGatewayFuture<'a, GatewayResult<()>> {
        self.ready(GatewayCall::Unshare(share_ids.to_vec()), |_| ())
    }

    fn create_public_share<'a>(
        &'a self,
        paths: &'a [String],
        name: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<String>> {
        self.ready(
            GatewayCall::CreatePublicShare {
                paths: paths.to_vec(),
                name: name.to_string(),
                scope,
            },
            |gw| {
                let mut inner = gw.inner.borrow_mut();
                inner.next_token += 1;
                format!("token-{}", inner.next_token)
            },
        )
    }

    fn delete_public_share<'a>(
        &'a self,
        token: &'a str,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        self.ready(GatewayCall::DeletePublicShare(token.to_string()), |_| ())
    }

    fn share_with_users<'a>(
        &'a self,
        paths: &'a [String],
        user_ids: &'a [u64],
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        self.ready(
            GatewayCall::ShareWithUsers {
                paths: paths.to_vec(),
                user_ids: user_ids.to_vec(),
            },
            |_| (),
        )
    }

    fn file_content<'a>(
        &'a self,
        source: &'a ContentSource,
    ) -> FileGatewayFuture<'a, GatewayResult<FileContent>> {
        let key = match source {
            ContentSource::Path { path, .. } => path.clone(),
            ContentSource::Share { share_id } => format!("share:{share_id}"),
        };
        let result = self
            .record(GatewayCall::FileContent(source.clone()))
            .and_then(|()| {
                self.inner
                    .borrow()
                    .contents
                    .get(&key)
                    .cloned()
                    .ok_or_else(|| GatewayError::remote(404, "File not found"))
            });
        Box::pin(async move { result })
    }

    fn view_file<'a>(
        &'a self,
        source: &'a ContentSource,
    ) -> FileGatewayFuture<'a, GatewayResult<Vec<u8>>> {
        self.ready(GatewayCall::ViewFile(source.clone()), |_| Vec::new())
    }

    fn download_shared<'a>(
        &'a self,
        share_id: u64,
    ) -> FileGatewayFuture<'a, GatewayResult<Vec<u8>>> {
        self.ready(GatewayCall::DownloadShared(share_id), |_| Vec::new())
    }

    fn download_url(&self, source: &ContentSource) -> Option<String> {
        Some(match source {
            ContentSource::Path { path, .. } => format!("memory://view{path}"),
            ContentSource::Share { share_id } => format!("memory://share/{share_id}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    fn entry(name: &str) -> DirectoryEntry {
        DirectoryEntry {
            name: name.to_string(),
            path: format!("/{name}"),
            kind: FileKind::File,
            size: 1,
            modified_at: String::new(),
            is_shared: false,
        }
    }

    #[test]
    fn memory_gateway_serves_seeded_listing_per_scope() {
        let gateway = MemoryFileGateway::default();
        let gateway_obj: &dyn FileGateway = &gateway;
        gateway.set_directory(FileScope::Home, "/", vec![entry("a.txt")]);

        let listed = block_on(gateway_obj.list_directory("/", FileScope::Home)).expect("list");
        assert_eq!(listed, vec![entry("a.txt")]);

        let err = block_on(gateway_obj.list_directory("/", FileScope::SystemRoot))
            .expect_err("unseeded scope");
        assert_eq!(err.user_message("fallback"), "Directory not found");
        assert_eq!(gateway.listing_count(), 2);
    }

    #[test]
    fn memory_gateway_scripts_failures_per_op_and_per_upload() {
        let gateway = MemoryFileGateway::default();
        let gateway_obj: &dyn FileGateway = &gateway;
        gateway.fail("rename", GatewayError::remote(400, "bad name"));
        gateway.fail_upload("b.bin", GatewayError::Network("offline".to_string()));

        assert!(block_on(gateway_obj.rename("/a", "b", FileScope::Home)).is_err());

        let ok = UploadFile {
            name: "a.bin".to_string(),
            bytes: vec![1],
        };
        let bad = UploadFile {
            name: "b.bin".to_string(),
            bytes: vec![2],
        };
        assert!(block_on(gateway_obj.upload(&ok, "/", FileScope::Home)).is_ok());
        assert!(block_on(gateway_obj.upload(&bad, "/", FileScope::Home)).is_err());
        assert_eq!(gateway.mutation_calls().len(), 3);

        gateway.clear_failures();
        assert!(block_on(gateway_obj.rename("/a", "b", FileScope::Home)).is_ok());
    }

    #[test]
    fn memory_gateway_issues_distinct_share_tokens() {
        let gateway = MemoryFileGateway::default();
        let gateway_obj: &dyn FileGateway = &gateway;
        let paths = vec!["/a".to_string()];

        let first =
            block_on(gateway_obj.create_public_share(&paths, "a", FileScope::Home)).expect("share");
        let second =
            block_on(gateway_obj.create_public_share(&paths, "a", FileScope::Home)).expect("share");
        assert_ne!(first, second);
    }
}
