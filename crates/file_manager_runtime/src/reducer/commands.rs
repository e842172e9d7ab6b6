//! Reducer helpers for menu and toolbar commands acting on the selection.

use platform_host::{FileKind, UploadFile};

use crate::{
    context_menu::MenuCommand,
    model::{
        Clipboard, FileItem, FileManagerState, ItemId, Modal, Mutation,
        MutationOrigin, MutationRequest, PendingConfirmation, ToastLevel,
    },
    preview::{PreviewKind, PreviewState},
    reducer::{modals, FileManagerEffect, ReducerError, ValidationError},
    view_mode::ViewMode,
};

const DELETE_FAILED: &str = "Failed to complete the delete operation.";
const UNSHARE_FAILED: &str = "Failed to remove/unshare item(s).";

pub(super) fn run_command(
    state: &mut FileManagerState,
    command: MenuCommand,
) -> Result<Vec<FileManagerEffect>, ReducerError> {
    use MenuCommand as C;

    let mut effects = Vec::new();
    match command {
        C::View => {
            if let Some(item) = state.single_selected().cloned() {
                effects.extend(open_viewer(state, &item)?);
            }
        }
        C::Download => {
            if state.view != ViewMode::SharedWithMe {
                return Err(ReducerError::NotAllowedInView);
            }
            if let Some(FileItem::SharedWithMe(entry)) = state.single_selected() {
                effects.push(FileManagerEffect::DownloadShared {
                    share_id: entry.id,
                    name: entry.name.clone(),
                });
            }
        }
        C::SharePublic => {
            let paths = selected_directory_paths(state)?;
            if !paths.is_empty() {
                let name = match paths.as_slice() {
                    [single] => platform_host::file_name(single).to_string(),
                    many => format!("{} Shared Items", many.len()),
                };
                effects.extend(modals::replace(
                    state,
                    Modal::SharePublic {
                        paths,
                        name,
                        token: None,
                    },
                ));
            }
        }
        C::ShareWithUsers => {
            let paths = selected_directory_paths(state)?;
            if !paths.is_empty() {
                effects.extend(modals::replace(
                    state,
                    Modal::ShareWithUsers {
                        paths,
                        users: Vec::new(),
                        chosen: Default::default(),
                        loading: true,
                    },
                ));
                effects.push(FileManagerEffect::LoadShareUsers);
            }
        }
        C::Copy | C::Cut => fill_clipboard(state, command == C::Cut)?,
        C::CopyPaths => {
            let lines: Vec<String> = state
                .selected_items()
                .into_iter()
                .map(FileItem::clipboard_line)
                .collect();
            if !lines.is_empty() {
                effects.push(FileManagerEffect::WriteClipboard {
                    text: lines.join("\n"),
                    success: "Path(s) copied to clipboard.".to_string(),
                    failure: "Failed to copy paths.".to_string(),
                });
            }
        }
        C::Paste => effects.extend(paste(state)),
        C::Rename => {
            if state.view.is_restricted() {
                return Err(ReducerError::NotAllowedInView);
            }
            if let Some(item) = state.single_selected() {
                let modal = Modal::Rename {
                    path: item.path().to_string(),
                    original_name: item.name().to_string(),
                    name: item.name().to_string(),
                };
                effects.extend(modals::replace(state, modal));
            }
        }
        C::MoveTo => {
            let paths = selected_directory_paths(state)?;
            if !paths.is_empty() {
                let destination = state.location.clone();
                effects.extend(modals::replace(state, Modal::Move { paths, destination }));
            }
        }
        C::Delete | C::DeletePermanently | C::RemoveFromList | C::Unshare => {
            request_delete(state, command)?;
        }
        C::Restore => {
            if state.view != ViewMode::Trash {
                return Err(ReducerError::NotAllowedInView);
            }
            let trashed_names = selected_trashed_names(state);
            if !trashed_names.is_empty() {
                let count = trashed_names.len();
                effects.push(FileManagerEffect::Mutate(MutationRequest {
                    mutation: Mutation::Restore { trashed_names },
                    scope: state.scope,
                    origin: MutationOrigin::Direct,
                    success: format!("{count} item(s) restored."),
                    failure: "Failed to restore one or more items.".to_string(),
                }));
            }
        }
        C::NewFile => effects.extend(modals::open_create(state, FileKind::File)?),
        C::NewFolder => effects.extend(modals::open_create(state, FileKind::Dir)?),
    }
    Ok(effects)
}

/// Opens the viewer for `item` and requests its content.
pub(super) fn open_viewer(
    state: &mut FileManagerState,
    item: &FileItem,
) -> Result<Vec<FileManagerEffect>, ReducerError> {
    if item.is_dir() {
        state
            .toasts
            .error(ValidationError::DirectoryPreview.to_string());
        return Ok(Vec::new());
    }
    let source = item
        .content_source(state.scope)
        .ok_or(ReducerError::NotAllowedInView)?;
    let kind = PreviewKind::classify(item.name());
    let content = if kind == PreviewKind::Unsupported {
        PreviewState::Unsupported
    } else {
        PreviewState::Loading
    };

    let mut effects: Vec<FileManagerEffect> = modals::replace(
        state,
        Modal::Viewer {
            item: item.clone(),
            source: source.clone(),
            kind,
            content,
        },
    )
    .into_iter()
    .collect();
    if kind != PreviewKind::Unsupported {
        effects.push(FileManagerEffect::LoadPreview {
            source,
            kind,
            file_name: item.name().to_string(),
            size: item.size(),
        });
    }
    Ok(effects)
}

pub(super) fn request_empty_trash(state: &mut FileManagerState) {
    if state.items.is_empty() {
        return;
    }
    state.confirmation = Some(PendingConfirmation {
        message: "Are you sure you want to permanently empty the trash? This action cannot be undone."
            .to_string(),
        request: MutationRequest {
            mutation: Mutation::EmptyTrash,
            scope: state.scope,
            origin: MutationOrigin::Direct,
            success: "Trash has been emptied.".to_string(),
            failure: "Failed to empty trash.".to_string(),
        },
    });
}

/// Starts one concurrent upload batch into the current directory.
pub(super) fn upload(
    state: &mut FileManagerState,
    files: Vec<UploadFile>,
) -> Option<FileManagerEffect> {
    if files.is_empty() {
        return None;
    }
    let toast_id = state.toasts.push(
        ToastLevel::Loading,
        format!("Uploading {} file(s)...", files.len()),
    );
    Some(FileManagerEffect::UploadBatch {
        files,
        destination: state.location.clone(),
        scope: state.scope,
        toast_id,
    })
}

fn selected_ids(state: &FileManagerState) -> Vec<ItemId> {
    state
        .selected_items()
        .into_iter()
        .map(FileItem::id)
        .collect()
}

fn selected_directory_paths(state: &FileManagerState) -> Result<Vec<String>, ReducerError> {
    if state.view.is_restricted() {
        return Err(ReducerError::NotAllowedInView);
    }
    Ok(state.selected_paths())
}

fn selected_trashed_names(state: &FileManagerState) -> Vec<String> {
    selected_ids(state)
        .iter()
        .filter_map(|id| id.as_trashed_name().map(str::to_string))
        .collect()
}

fn selected_share_ids(state: &FileManagerState) -> Vec<u64> {
    selected_ids(state)
        .iter()
        .filter_map(ItemId::as_share_id)
        .collect()
}

fn fill_clipboard(state: &mut FileManagerState, cut: bool) -> Result<(), ReducerError> {
    let paths = selected_directory_paths(state)?;
    if paths.is_empty() {
        return Ok(());
    }
    let count = paths.len();
    let scope = state.scope;
    if cut {
        state.clipboard = Clipboard::Cut { paths, scope };
        state.toasts.success(format!("{count} item(s) cut."));
    } else {
        state.clipboard = Clipboard::Copy { paths, scope };
        state.toasts.success(format!("{count} item(s) copied."));
    }
    Ok(())
}

fn paste(state: &mut FileManagerState) -> Option<FileManagerEffect> {
    if state.clipboard.is_empty() {
        return None;
    }
    if state.view.is_restricted() {
        state
            .toasts
            .error(ValidationError::PasteNotAllowed.to_string());
        return None;
    }
    let destination = state.location.clone();
    let (success, scope, mutation) = match state.clipboard.clone() {
        Clipboard::Empty => return None,
        Clipboard::Cut { paths, scope } => (
            format!("{} item(s) moved successfully.", paths.len()),
            scope,
            Mutation::Move {
                sources: paths,
                destination,
            },
        ),
        Clipboard::Copy { paths, scope } => (
            format!("{} item(s) pasted successfully.", paths.len()),
            scope,
            Mutation::Copy {
                sources: paths,
                destination,
            },
        ),
    };
    if scope != state.scope {
        state
            .toasts
            .error(ValidationError::CrossScopeMove.to_string());
        return None;
    }
    Some(FileManagerEffect::Mutate(MutationRequest {
        mutation,
        scope,
        origin: MutationOrigin::Paste,
        success,
        failure: "Failed to paste item(s).".to_string(),
    }))
}

fn request_delete(
    state: &mut FileManagerState,
    command: MenuCommand,
) -> Result<(), ReducerError> {
    use MenuCommand as C;

    let scope = state.scope;
    let (mutation, count, message, success, failure) = match (state.view, command) {
        (ViewMode::Directory, C::Delete) => {
            let paths = state.selected_paths();
            let count = paths.len();
            (
                Mutation::Trash { paths },
                count,
                format!("Are you sure you want to move {count} item(s) to the trash?"),
                format!("{count} item(s) deleted."),
                DELETE_FAILED,
            )
        }
        (ViewMode::Trash, C::Delete | C::DeletePermanently) => {
            let trashed_names = selected_trashed_names(state);
            let count = trashed_names.len();
            (
                Mutation::DeletePermanently { trashed_names },
                count,
                format!(
                    "Are you sure you want to permanently delete {count} item(s)? This action cannot be undone."
                ),
                format!("{count} item(s) deleted."),
                DELETE_FAILED,
            )
        }
        (ViewMode::SharedWithMe, C::Delete | C::RemoveFromList) => {
            let share_ids = selected_share_ids(state);
            let count = share_ids.len();
            (
                Mutation::Unshare { share_ids },
                count,
                format!(
                    "Are you sure you want to remove {count} item(s) from your 'Shared with me' list? This will not delete the original files."
                ),
                format!("{count} item(s) removed/unshared successfully."),
                UNSHARE_FAILED,
            )
        }
        (ViewMode::MyShares, C::Delete | C::Unshare) => {
            let share_ids = selected_share_ids(state);
            let count = share_ids.len();
            (
                Mutation::Unshare { share_ids },
                count,
                format!(
                    "Are you sure you want to unshare {count} item(s)? This will revoke access for the recipients."
                ),
                format!("{count} item(s) removed/unshared successfully."),
                UNSHARE_FAILED,
            )
        }
        _ => return Err(ReducerError::NotAllowedInView),
    };
    if count == 0 {
        return Ok(());
    }
    state.confirmation = Some(PendingConfirmation {
        message,
        request: MutationRequest {
            mutation,
            scope,
            origin: MutationOrigin::Direct,
            success,
            failure: failure.to_string(),
        },
    });
    Ok(())
}
