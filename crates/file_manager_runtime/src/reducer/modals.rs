use platform_host::{normalize_virtual_path, FileKind};

use crate::{
    model::{FileManagerState, Modal, ModalState, Mutation, MutationOrigin, MutationRequest},
    reducer::{FileManagerEffect, ReducerError, ValidationError},
};

/// Opens `modal`, releasing the media URL of a viewer it replaces.
pub(super) fn replace(state: &mut FileManagerState, modal: Modal) -> Option<FileManagerEffect> {
    let released = release_viewer_url(state.modal.take());
    state.modal = Some(ModalState::new(modal));
    released
}

pub(super) fn open_create(
    state: &mut FileManagerState,
    kind: FileKind,
) -> Result<Option<FileManagerEffect>, ReducerError> {
    if state.view.is_restricted() {
        return Err(ReducerError::NotAllowedInView);
    }
    Ok(replace(
        state,
        Modal::Create {
            kind,
            name: String::new(),
        },
    ))
}

pub(super) fn edit_name(state: &mut FileManagerState, value: String) {
    let Some(open) = state.modal.as_mut() else {
        return;
    };
    match &mut open.modal {
        Modal::Create { name, .. } | Modal::Rename { name, .. } => *name = value,
        // The name is frozen once the link exists.
        Modal::SharePublic {
            name, token: None, ..
        } => *name = value,
        _ => return,
    }
    open.error = None;
}

pub(super) fn edit_destination(state: &mut FileManagerState, value: String) {
    if let Some(open) = state.modal.as_mut() {
        if let Modal::Move { destination, .. } = &mut open.modal {
            *destination = value;
            open.error = None;
        }
    }
}

pub(super) fn toggle_recipient(state: &mut FileManagerState, user_id: u64) {
    if let Some(open) = state.modal.as_mut() {
        if let Modal::ShareWithUsers { users, chosen, .. } = &mut open.modal {
            if !users.iter().any(|user| user.id == user_id) {
                return;
            }
            if !chosen.remove(&user_id) {
                chosen.insert(user_id);
            }
            open.error = None;
        }
    }
}

pub(super) fn select_all_recipients(state: &mut FileManagerState) {
    if let Some(open) = state.modal.as_mut() {
        if let Modal::ShareWithUsers { users, chosen, .. } = &mut open.modal {
            chosen.extend(users.iter().map(|user| user.id));
            open.error = None;
        }
    }
}

pub(super) fn clear_recipients(state: &mut FileManagerState) {
    if let Some(open) = state.modal.as_mut() {
        if let Modal::ShareWithUsers { chosen, .. } = &mut open.modal {
            chosen.clear();
        }
    }
}

/// Validates the open form and emits its remote request.
///
/// Invalid input is reported inline on the modal and produces no effect. A busy modal ignores
/// repeated submits until its request settles.
pub(super) fn submit(state: &mut FileManagerState) -> Option<FileManagerEffect> {
    let open = state.modal.as_ref()?;
    if open.busy {
        return None;
    }
    let scope = state.scope;

    let outcome = match &open.modal {
        Modal::Create { kind, name } => {
            let name = name.trim();
            if name.is_empty() {
                Err(ValidationError::EmptyName)
            } else {
                let noun = if kind.is_dir() { "folder" } else { "file" };
                Ok(modal_request(
                    Mutation::Create {
                        parent: state.location.clone(),
                        name: name.to_string(),
                        kind: *kind,
                    },
                    scope,
                    format!("'{name}' created successfully."),
                    format!("Failed to create {noun}."),
                ))
            }
        }
        Modal::Rename {
            path,
            original_name,
            name,
        } => {
            let new_name = name.trim();
            if new_name.is_empty() {
                Err(ValidationError::EmptyName)
            } else if new_name == original_name {
                state.modal = None;
                return None;
            } else {
                Ok(modal_request(
                    Mutation::Rename {
                        path: path.clone(),
                        new_name: new_name.to_string(),
                    },
                    scope,
                    format!("Renamed to '{new_name}'."),
                    "Failed to rename item.".to_string(),
                ))
            }
        }
        Modal::Move { paths, destination } => {
            if destination.trim().is_empty() {
                Err(ValidationError::EmptyDestination)
            } else {
                let destination = normalize_virtual_path(destination);
                let into_itself = paths.iter().any(|path| {
                    destination == *path || destination.starts_with(&format!("{path}/"))
                });
                if into_itself {
                    Err(ValidationError::SelfMove)
                } else {
                    Ok(modal_request(
                        Mutation::Move {
                            sources: paths.clone(),
                            destination,
                        },
                        scope,
                        format!("{} item(s) moved successfully.", paths.len()),
                        "Failed to move item(s).".to_string(),
                    ))
                }
            }
        }
        Modal::SharePublic { paths, name, token } => {
            if token.is_some() {
                return None;
            }
            let name = name.trim();
            if name.is_empty() {
                Err(ValidationError::EmptyShareName)
            } else {
                Ok(FileManagerEffect::CreatePublicShare {
                    paths: paths.clone(),
                    name: name.to_string(),
                    scope,
                })
            }
        }
        Modal::ShareWithUsers {
            paths,
            chosen,
            loading,
            ..
        } => {
            if *loading {
                return None;
            }
            if chosen.is_empty() {
                Err(ValidationError::NoRecipients)
            } else {
                Ok(modal_request(
                    Mutation::ShareWithUsers {
                        paths: paths.clone(),
                        user_ids: chosen.iter().copied().collect(),
                    },
                    scope,
                    "File(s) shared successfully.".to_string(),
                    "Failed to share file(s).".to_string(),
                ))
            }
        }
        Modal::Viewer { .. } => return None,
    };

    let open = state.modal.as_mut()?;
    match outcome {
        Ok(effect) => {
            open.error = None;
            open.busy = true;
            Some(effect)
        }
        Err(err) => {
            open.error = Some(err.to_string());
            None
        }
    }
}

pub(super) fn close(state: &mut FileManagerState) -> Option<FileManagerEffect> {
    release_viewer_url(state.modal.take())
}

/// Deletes the public link currently shown in the share modal.
pub(super) fn revoke_public_share(state: &mut FileManagerState) -> Option<FileManagerEffect> {
    let open = state.modal.as_mut()?;
    let Modal::SharePublic {
        token: Some(token), ..
    } = &open.modal
    else {
        return None;
    };
    if open.busy {
        return None;
    }
    let token = token.clone();
    open.busy = true;
    open.error = None;
    Some(FileManagerEffect::DeletePublicShare { token })
}

fn modal_request(
    mutation: Mutation,
    scope: platform_host::FileScope,
    success: String,
    failure: String,
) -> FileManagerEffect {
    FileManagerEffect::Mutate(MutationRequest {
        mutation,
        scope,
        origin: MutationOrigin::Modal,
        success,
        failure,
    })
}

fn release_viewer_url(previous: Option<ModalState>) -> Option<FileManagerEffect> {
    match previous?.modal {
        Modal::Viewer { content, .. } => content
            .object_url()
            .map(|url| FileManagerEffect::ReleaseObjectUrl {
                url: url.to_string(),
            }),
        _ => None,
    }
}
