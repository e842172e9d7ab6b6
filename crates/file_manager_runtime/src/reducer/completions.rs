//! Reducer helpers applying the outcome of remote work started by earlier effects.

use platform_host::{ContentSource, UserAccount};

use crate::{
    model::{Clipboard, FileManagerState, Modal, MutationOrigin, ToastLevel},
    preview::PreviewState,
    reducer::{modals, start_listing, FileManagerEffect},
};

pub(super) fn mutation_succeeded(
    state: &mut FileManagerState,
    origin: MutationOrigin,
    message: String,
) -> Vec<FileManagerEffect> {
    let mut effects = Vec::new();
    state.toasts.success(message);
    match origin {
        MutationOrigin::Modal => {
            if state.modal.as_ref().is_some_and(|open| open.busy) {
                effects.extend(modals::close(state));
            }
        }
        MutationOrigin::Paste => state.clipboard = Clipboard::Empty,
        MutationOrigin::Direct => {}
    }
    effects.push(start_listing(state));
    effects
}

pub(super) fn mutation_failed(
    state: &mut FileManagerState,
    origin: MutationOrigin,
    message: String,
) {
    if origin == MutationOrigin::Modal {
        if let Some(open) = state.modal.as_mut().filter(|open| open.busy) {
            open.busy = false;
            open.error = Some(message.clone());
        }
    }
    state.toasts.error(message);
}

/// Replaces the batch's loading toast with one aggregate outcome and re-fetches once.
pub(super) fn upload_finished(
    state: &mut FileManagerState,
    toast_id: u64,
    total: usize,
    failed: usize,
) -> Vec<FileManagerEffect> {
    if failed == 0 {
        state.toasts.replace(
            toast_id,
            ToastLevel::Success,
            format!("{total} file(s) uploaded successfully!"),
        );
    } else {
        state.toasts.replace(
            toast_id,
            ToastLevel::Error,
            "An error occurred during upload.",
        );
    }
    vec![start_listing(state)]
}

pub(super) fn public_share_created(state: &mut FileManagerState, new_token: String) {
    if let Some(open) = state.modal.as_mut() {
        if let Modal::SharePublic { token, .. } = &mut open.modal {
            *token = Some(new_token);
            open.busy = false;
            open.error = None;
        }
    }
}

pub(super) fn public_share_revoked(state: &mut FileManagerState) {
    if let Some(open) = state.modal.as_mut() {
        if let Modal::SharePublic { token, .. } = &mut open.modal {
            *token = None;
            open.busy = false;
            open.error = None;
        }
    }
}

pub(super) fn public_share_failed(state: &mut FileManagerState, message: String) {
    if let Some(open) = state.modal.as_mut() {
        if matches!(open.modal, Modal::SharePublic { .. }) {
            open.busy = false;
            open.error = Some(message);
        }
    }
}

/// Fills the recipient list, leaving out the signed-in user.
pub(super) fn share_users_loaded(state: &mut FileManagerState, loaded: Vec<UserAccount>) {
    let me = state.user.as_ref().map(|user| user.id);
    if let Some(open) = state.modal.as_mut() {
        if let Modal::ShareWithUsers { users, loading, .. } = &mut open.modal {
            *users = loaded
                .into_iter()
                .filter(|user| Some(user.id) != me)
                .collect();
            *loading = false;
        }
    }
}

pub(super) fn share_users_failed(state: &mut FileManagerState, message: String) {
    let is_share_modal = state
        .modal
        .as_ref()
        .is_some_and(|open| matches!(open.modal, Modal::ShareWithUsers { .. }));
    if is_share_modal {
        state.modal = None;
        state.toasts.error(message);
    }
}

/// Fills the open viewer when `source` still matches it.
///
/// Content arriving for a viewer that was closed or replaced is dropped, and a media URL
/// created for it is released.
pub(super) fn preview_loaded(
    state: &mut FileManagerState,
    loaded_from: ContentSource,
    loaded: PreviewState,
) -> Option<FileManagerEffect> {
    if let Some(open) = state.modal.as_mut() {
        if let Modal::Viewer {
            source, content, ..
        } = &mut open.modal
        {
            if *source == loaded_from && *content == PreviewState::Loading {
                *content = loaded;
                return None;
            }
        }
    }
    loaded
        .object_url()
        .map(|url| FileManagerEffect::ReleaseObjectUrl {
            url: url.to_string(),
        })
}
