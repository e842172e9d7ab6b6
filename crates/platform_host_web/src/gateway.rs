//! REST adapter for [`FileGateway`].

use platform_host::{
    ContentSource, DirectoryEntry, FileContent, FileGateway, FileGatewayFuture, FileKind,
    FileScope, GatewayError, GatewayResult, MyShareEntry, SharedWithMeEntry, TrashEntry,
    UploadFile, UserAccount, ZipEntry,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::transport::{self, UploadFields};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Browser gateway talking to the backend's `/api` routes.
pub struct HttpFileGateway {
    base_url: String,
}

impl HttpFileGateway {
    /// Creates a gateway rooted at `base_url` (for example `http://host:5000/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the API root this gateway talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}{route}", self.base_url)
    }

    fn endpoint_with(&self, route: &str, query: &[(&str, String)]) -> String {
        let encoded = query
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        if encoded.is_empty() {
            self.endpoint(route)
        } else {
            format!("{}?{encoded}", self.endpoint(route))
        }
    }

    fn path_query(path: &str, scope: FileScope) -> Vec<(&'static str, String)> {
        let mut query = vec![("path", path.to_string())];
        if scope.system_root_access() {
            query.push(("system_root_access", "true".to_string()));
        }
        query
    }

    fn content_url(&self, source: &ContentSource) -> String {
        match source {
            ContentSource::Path { path, scope } => {
                self.endpoint_with("/files/content", &Self::path_query(path, *scope))
            }
            ContentSource::Share { share_id } => self.endpoint_with(
                "/files/shared-with-me/content",
                &[("share_id", share_id.to_string())],
            ),
        }
    }

    fn view_url(&self, source: &ContentSource) -> String {
        match source {
            ContentSource::Path { path, scope } => {
                self.endpoint_with("/files/view", &Self::path_query(path, *scope))
            }
            ContentSource::Share { share_id } => self.endpoint_with(
                "/files/shared-with-me/view",
                &[("share_id", share_id.to_string())],
            ),
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: String) -> GatewayResult<T> {
        let body = transport::get_text(&url).await?;
        decode(&body)
    }

    async fn post<B: Serialize>(&self, route: &str, body: &B) -> GatewayResult<String> {
        let raw =
            serde_json::to_string(body).map_err(|err| GatewayError::Decode(err.to_string()))?;
        transport::post_json(&self.endpoint(route), raw).await
    }

    async fn post_unit<B: Serialize>(&self, route: &str, body: &B) -> GatewayResult<()> {
        self.post(route, body).await.map(|_| ())
    }
}

/// Parses a JSON response body.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> GatewayResult<T> {
    serde_json::from_str(body).map_err(|err| GatewayError::Decode(err.to_string()))
}

#[derive(Debug, Deserialize)]
struct AuthBody {
    #[serde(default)]
    is_logged_in: bool,
    user: Option<UserAccount>,
}

impl AuthBody {
    fn into_user(self) -> GatewayResult<UserAccount> {
        match (self.is_logged_in, self.user) {
            (true, Some(user)) => Ok(user),
            _ => Err(GatewayError::Remote {
                status: 401,
                message: None,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContentBody {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    contents: Vec<ZipEntry>,
}

impl From<ContentBody> for FileContent {
    fn from(body: ContentBody) -> Self {
        if body.kind.as_deref() == Some("zip_contents") {
            Self::ZipListing(body.contents)
        } else {
            Self::Text(body.content.unwrap_or_default())
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    token: String,
}

#[derive(Debug, Serialize)]
struct CreateBody<'a> {
    path: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    kind: FileKind,
    system_root_access: bool,
}

#[derive(Debug, Serialize)]
struct TransferBody<'a> {
    source_paths: &'a [String],
    destination_path: &'a str,
    system_root_access: bool,
}

#[derive(Debug, Serialize)]
struct RenameBody<'a> {
    old_path: &'a str,
    new_name: &'a str,
    system_root_access: bool,
}

#[derive(Debug, Serialize)]
struct PathsBody<'a> {
    paths: &'a [String],
    system_root_access: bool,
}

#[derive(Debug, Serialize)]
struct TrashedNamesBody<'a> {
    trashed_names: &'a [String],
}

#[derive(Debug, Serialize)]
struct ShareIdsBody<'a> {
    share_ids: &'a [u64],
}

#[derive(Debug, Serialize)]
struct PublicShareBody<'a> {
    paths: &'a [String],
    name: &'a str,
    system_root_access: bool,
}

#[derive(Debug, Serialize)]
struct TokenRef<'a> {
    token: &'a str,
}

#[derive(Debug, Serialize)]
struct UserShareBody<'a> {
    paths: &'a [String],
    recipient_user_ids: &'a [u64],
}

#[derive(Debug, Serialize)]
struct Empty {}

impl FileGateway for HttpFileGateway {
    fn current_user<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<UserAccount>> {
        Box::pin(async move {
            let body: AuthBody = self.get(self.endpoint("/check_auth")).await?;
            body.into_user()
        })
    }

    fn list_users<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<Vec<UserAccount>>> {
        Box::pin(async move { self.get(self.endpoint("/users")).await })
    }

    fn list_directory<'a>(
        &'a self,
        path: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<Vec<DirectoryEntry>>> {
        Box::pin(async move {
            self.get(self.endpoint_with("/files/browse", &Self::path_query(path, scope)))
                .await
        })
    }

    fn list_trash<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<Vec<TrashEntry>>> {
        Box::pin(async move { self.get(self.endpoint("/files/trash")).await })
    }

    fn list_shared_with_me<'a>(
        &'a self,
    ) -> FileGatewayFuture<'a, GatewayResult<Vec<SharedWithMeEntry>>> {
        Box::pin(async move { self.get(self.endpoint("/files/shared-with-me")).await })
    }

    fn list_my_shares<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<Vec<MyShareEntry>>> {
        Box::pin(async move { self.get(self.endpoint("/files/shared-by-me")).await })
    }

    fn create_item<'a>(
        &'a self,
        parent: &'a str,
        name: &'a str,
        kind: FileKind,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            let body = CreateBody {
                path: parent,
                name,
                kind,
                system_root_access: scope.system_root_access(),
            };
            self.post_unit("/files/create", &body).await
        })
    }

    fn upload<'a>(
        &'a self,
        file: &'a UploadFile,
        destination: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            let fields = UploadFields {
                destination,
                system_root_access: scope.system_root_access(),
            };
            transport::post_file(&self.endpoint("/files/upload"), file, fields).await
        })
    }

    fn move_items<'a>(
        &'a self,
        sources: &'a [String],
        destination: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            let body = TransferBody {
                source_paths: sources,
                destination_path: destination,
                system_root_access: scope.system_root_access(),
            };
            self.post_unit("/files/move", &body).await
        })
    }

    fn copy_items<'a>(
        &'a self,
        sources: &'a [String],
        destination: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            let body = TransferBody {
                source_paths: sources,
                destination_path: destination,
                system_root_access: scope.system_root_access(),
            };
            self.post_unit("/files/copy", &body).await
        })
    }

    fn rename<'a>(
        &'a self,
        path: &'a str,
        new_name: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            let body = RenameBody {
                old_path: path,
                new_name,
                system_root_access: scope.system_root_access(),
            };
            self.post_unit("/files/rename", &body).await
        })
    }

    fn trash_items<'a>(
        &'a self,
        paths: &'a [String],
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            let body = PathsBody {
                paths,
                system_root_access: scope.system_root_access(),
            };
            self.post_unit("/files/delete", &body).await
        })
    }

    fn delete_permanently<'a>(
        &'a self,
        trashed_names: &'a [String],
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            self.post_unit(
                "/files/trash/delete_permanently",
                &TrashedNamesBody { trashed_names },
            )
            .await
        })
    }

    fn restore<'a>(
        &'a self,
        trashed_names: &'a [String],
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            self.post_unit("/files/trash/restore", &TrashedNamesBody { trashed_names })
                .await
        })
    }

    fn empty_trash<'a>(&'a self) -> FileGatewayFuture<'a, GatewayResult<()>> {
        Box::pin(async move { self.post_unit("/files/trash/empty", &Empty {}).await })
    }

    fn unshare<'a>(&'a self, share_ids: &'a [u64]) -> FileGatewayFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            self.post_unit("/files/unshare-with-user", &ShareIdsBody { share_ids })
                .await
        })
    }

    fn create_public_share<'a>(
        &'a self,
        paths: &'a [String],
        name: &'a str,
        scope: FileScope,
    ) -> FileGatewayFuture<'a, GatewayResult<String>> {
        Box::pin(async move {
            let body = PublicShareBody {
                paths,
                name,
                system_root_access: scope.system_root_access(),
            };
            let raw = self.post("/files/share", &body).await?;
            decode::<TokenBody>(&raw).map(|body| body.token)
        })
    }

    fn delete_public_share<'a>(
        &'a self,
        token: &'a str,
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        Box::pin(async move { self.post_unit("/files/unshare", &TokenRef { token }).await })
    }

    fn share_with_users<'a>(
        &'a self,
        paths: &'a [String],
        user_ids: &'a [u64],
    ) -> FileGatewayFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            let body = UserShareBody {
                paths,
                recipient_user_ids: user_ids,
            };
            self.post_unit("/files/share-with-user", &body).await
        })
    }

    fn file_content<'a>(
        &'a self,
        source: &'a ContentSource,
    ) -> FileGatewayFuture<'a, GatewayResult<FileContent>> {
        Box::pin(async move {
            let body: ContentBody = self.get(self.content_url(source)).await?;
            Ok(body.into())
        })
    }

    fn view_file<'a>(
        &'a self,
        source: &'a ContentSource,
    ) -> FileGatewayFuture<'a, GatewayResult<Vec<u8>>> {
        Box::pin(async move { transport::get_bytes(&self.view_url(source)).await })
    }

    fn download_shared<'a>(
        &'a self,
        share_id: u64,
    ) -> FileGatewayFuture<'a, GatewayResult<Vec<u8>>> {
        Box::pin(async move {
            let url = self.endpoint_with(
                "/files/shared-with-me/download",
                &[("share_id", share_id.to_string())],
            );
            transport::get_bytes(&url).await
        })
    }

    fn download_url(&self, source: &ContentSource) -> Option<String> {
        Some(self.view_url(source))
    }
}
