//! Host-side execution of reducer effects against the injected [`HostServices`].
//!
//! Every effect runs to completion and reports back as [`FileManagerAction`] values, so the
//! whole remote round-trip is testable without a browser. The Leptos effect executor only
//! spawns [`FileManagerHost::run_effect`] and dispatches what it returns.

use futures::future::join_all;
use leptos::logging;
use platform_host::{ContentSource, FileScope, GatewayResult, HostServices};

use crate::{
    config::FileManagerConfig,
    model::{FileItem, Mutation, MutationRequest, ToastLevel},
    preview::{PreviewKind, PreviewState},
    reducer::{FileManagerAction, FileManagerEffect},
    view_mode::ViewMode,
};

#[derive(Clone, Debug)]
/// Host service bundle plus runtime configuration for file manager side effects.
pub struct FileManagerHost {
    services: HostServices,
    config: FileManagerConfig,
}

impl FileManagerHost {
    pub fn new(services: HostServices, config: FileManagerConfig) -> Self {
        Self { services, config }
    }

    pub fn services(&self) -> &HostServices {
        &self.services
    }

    pub fn config(&self) -> &FileManagerConfig {
        &self.config
    }

    /// Direct download link for `source`, when the gateway can address one.
    pub fn download_url(&self, source: &ContentSource) -> Option<String> {
        self.services.files.download_url(source)
    }

    /// Runs one effect and returns the completion actions to dispatch.
    pub async fn run_effect(&self, effect: FileManagerEffect) -> Vec<FileManagerAction> {
        match effect {
            FileManagerEffect::LoadCurrentUser => {
                let user = match self.services.files.current_user().await {
                    Ok(user) => Some(user),
                    Err(err) => {
                        logging::warn!("current user lookup failed: {err}");
                        None
                    }
                };
                vec![FileManagerAction::CurrentUserLoaded { user }]
            }
            FileManagerEffect::LoadListing {
                generation,
                view,
                location,
                scope,
            } => match self.load_listing(view, &location, scope).await {
                Ok(items) => vec![FileManagerAction::ListingLoaded { generation, items }],
                Err(err) => {
                    logging::warn!("listing {location} failed: {err}");
                    vec![FileManagerAction::ListingFailed {
                        generation,
                        message: err.user_message("Failed to load directory."),
                    }]
                }
            },
            FileManagerEffect::Mutate(request) => vec![self.mutate(request).await],
            FileManagerEffect::UploadBatch {
                files,
                destination,
                scope,
                toast_id,
            } => {
                let uploads = files
                    .iter()
                    .map(|file| self.services.files.upload(file, &destination, scope));
                let results = join_all(uploads).await;
                let mut failed = 0;
                for (file, result) in files.iter().zip(&results) {
                    if let Err(err) = result {
                        logging::warn!("upload {} failed: {err}", file.name);
                        failed += 1;
                    }
                }
                vec![FileManagerAction::UploadFinished {
                    toast_id,
                    total: files.len(),
                    failed,
                }]
            }
            FileManagerEffect::CreatePublicShare { paths, name, scope } => {
                match self
                    .services
                    .files
                    .create_public_share(&paths, &name, scope)
                    .await
                {
                    Ok(token) => vec![FileManagerAction::PublicShareCreated { token }],
                    Err(err) => {
                        logging::warn!("create public share failed: {err}");
                        vec![FileManagerAction::PublicShareFailed {
                            message: "Failed to create public link.".to_string(),
                        }]
                    }
                }
            }
            FileManagerEffect::DeletePublicShare { token } => {
                match self.services.files.delete_public_share(&token).await {
                    Ok(()) => vec![FileManagerAction::PublicShareRevoked],
                    Err(err) => {
                        logging::warn!("delete public share failed: {err}");
                        vec![FileManagerAction::PublicShareFailed {
                            message: "Failed to delete public link.".to_string(),
                        }]
                    }
                }
            }
            FileManagerEffect::LoadShareUsers => match self.services.files.list_users().await {
                Ok(users) => vec![FileManagerAction::ShareUsersLoaded { users }],
                Err(err) => {
                    logging::warn!("loading share recipients failed: {err}");
                    vec![FileManagerAction::ShareUsersFailed {
                        message: "Could not load users for sharing.".to_string(),
                    }]
                }
            },
            FileManagerEffect::LoadPreview {
                source,
                kind,
                file_name,
                size,
            } => {
                let content = self.load_preview(&source, kind, &file_name, size).await;
                vec![FileManagerAction::PreviewLoaded { source, content }]
            }
            FileManagerEffect::ReleaseObjectUrl { url } => {
                self.services.blobs.revoke_object_url(&url);
                Vec::new()
            }
            FileManagerEffect::WriteClipboard {
                text,
                success,
                failure,
            } => match self.services.clipboard.write_text(&text).await {
                Ok(()) => vec![notify(ToastLevel::Success, success)],
                Err(err) => {
                    logging::warn!("clipboard write failed: {err}");
                    vec![notify(ToastLevel::Error, failure)]
                }
            },
            FileManagerEffect::DownloadShared { share_id, name } => {
                let saved = match self.services.files.download_shared(share_id).await {
                    Ok(bytes) => self.services.blobs.save_as(&name, &bytes),
                    Err(err) => Err(err.to_string()),
                };
                match saved {
                    Ok(()) => vec![notify(ToastLevel::Success, format!("Downloading {name}..."))],
                    Err(err) => {
                        logging::warn!("download of share {share_id} failed: {err}");
                        vec![notify(ToastLevel::Error, format!("Failed to download {name}."))]
                    }
                }
            }
        }
    }

    async fn load_listing(
        &self,
        view: ViewMode,
        location: &str,
        scope: FileScope,
    ) -> GatewayResult<Vec<FileItem>> {
        let files = &self.services.files;
        let items = match view {
            ViewMode::Directory => files
                .list_directory(location, scope)
                .await?
                .into_iter()
                .map(FileItem::Directory)
                .collect(),
            ViewMode::Trash => files
                .list_trash()
                .await?
                .into_iter()
                .map(FileItem::Trash)
                .collect(),
            ViewMode::SharedWithMe => files
                .list_shared_with_me()
                .await?
                .into_iter()
                .map(FileItem::SharedWithMe)
                .collect(),
            ViewMode::MyShares => files
                .list_my_shares()
                .await?
                .into_iter()
                .map(FileItem::MyShare)
                .collect(),
        };
        Ok(items)
    }

    async fn mutate(&self, request: MutationRequest) -> FileManagerAction {
        let files = &self.services.files;
        let scope = request.scope;
        let result = match &request.mutation {
            Mutation::Create { parent, name, kind } => {
                files.create_item(parent, name, *kind, scope).await
            }
            Mutation::Rename { path, new_name } => files.rename(path, new_name, scope).await,
            Mutation::Move {
                sources,
                destination,
            } => files.move_items(sources, destination, scope).await,
            Mutation::Copy {
                sources,
                destination,
            } => files.copy_items(sources, destination, scope).await,
            Mutation::Trash { paths } => files.trash_items(paths, scope).await,
            Mutation::DeletePermanently { trashed_names } => {
                files.delete_permanently(trashed_names).await
            }
            Mutation::Restore { trashed_names } => files.restore(trashed_names).await,
            Mutation::EmptyTrash => files.empty_trash().await,
            Mutation::Unshare { share_ids } => files.unshare(share_ids).await,
            Mutation::ShareWithUsers { paths, user_ids } => {
                files.share_with_users(paths, user_ids).await
            }
        };
        match result {
            Ok(()) => FileManagerAction::MutationSucceeded {
                origin: request.origin,
                message: request.success,
            },
            Err(err) => {
                logging::warn!("{} failed: {err}", request.mutation.op());
                FileManagerAction::MutationFailed {
                    origin: request.origin,
                    message: err.user_message(&request.failure),
                }
            }
        }
    }

    async fn load_preview(
        &self,
        source: &ContentSource,
        kind: PreviewKind,
        file_name: &str,
        size: u64,
    ) -> PreviewState {
        let files = &self.services.files;
        if kind.uses_content_endpoint() {
            if kind == PreviewKind::Text && size > self.config.max_preview_bytes {
                return PreviewState::TooLarge;
            }
            return match files.file_content(source).await {
                Ok(content) => PreviewState::from_content(content),
                Err(err) => PreviewState::from_failure(err.user_message("Failed to load file.")),
            };
        }
        if !kind.is_media() {
            return PreviewState::Unsupported;
        }
        let bytes = match files.view_file(source).await {
            Ok(bytes) => bytes,
            Err(err) => {
                return PreviewState::from_failure(err.user_message("Failed to load file."))
            }
        };
        match self
            .services
            .blobs
            .object_url(&bytes, PreviewKind::mime_type(file_name))
        {
            Ok(url) => PreviewState::Media { url },
            Err(err) => {
                logging::warn!("object url for {file_name} failed: {err}");
                PreviewState::Failed("Failed to load file.".to_string())
            }
        }
    }
}

fn notify(level: ToastLevel, message: String) -> FileManagerAction {
    FileManagerAction::Notify { level, message }
}
