//! Reducer actions, side-effect intents, and transition logic for the file manager.
//!
//! [`reduce_file_manager`] is the only place page state changes. It never talks to the backend:
//! remote work is described as [`FileManagerEffect`] values that the effect executor runs, and
//! their outcomes come back as completion actions.

mod commands;
mod completions;
mod modals;

use platform_host::{
    normalize_virtual_path, parent_path, ContentSource, FileKind, FileScope, UploadFile,
    UserAccount,
};
use thiserror::Error;

use crate::{
    context_menu::{self, MenuCommand, MenuPosition},
    drag::{self, DropDecision},
    listing::SortColumn,
    model::{
        FileItem, FileManagerState, InteractionState, ItemId, Mutation, MutationOrigin,
        MutationRequest, ToastLevel,
    },
    preview::{PreviewKind, PreviewState},
    selection::ClickModifiers,
    view_mode::ViewMode,
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_file_manager`].
pub enum FileManagerAction {
    /// Load the signed-in user and the initial listing.
    Boot,
    /// Result of the current-user lookup.
    CurrentUserLoaded {
        /// Signed-in account, or `None` when the lookup failed.
        user: Option<UserAccount>,
    },
    /// Go to an absolute directory path or a virtual view token.
    Navigate {
        /// Target location.
        location: String,
    },
    /// Go to the parent directory.
    GoUp,
    /// Re-fetch the current listing.
    Refresh,
    /// Switch between the home tree and the admin-only system root.
    SwitchScope {
        /// Requested scope.
        scope: FileScope,
    },
    /// A listing request finished.
    ListingLoaded {
        /// Generation the request was issued under.
        generation: u64,
        /// Items for the active view.
        items: Vec<FileItem>,
    },
    /// A listing request failed.
    ListingFailed {
        /// Generation the request was issued under.
        generation: u64,
        /// User-facing reason.
        message: String,
    },
    /// Left click on an item row.
    ItemClicked {
        /// Clicked item.
        id: ItemId,
        /// Modifier keys held during the click.
        modifiers: ClickModifiers,
    },
    /// Double click on an item row.
    ItemDoubleClicked {
        /// Clicked item.
        id: ItemId,
    },
    /// Left click on the listing background.
    BackgroundClicked,
    /// Left click anywhere in the document.
    DocumentClicked,
    /// Keyboard select-all.
    SelectAll,
    /// Right click on an item row.
    OpenItemMenu {
        /// Right-clicked item.
        id: ItemId,
        /// Page coordinates of the click.
        position: MenuPosition,
    },
    /// Right click on the listing background.
    OpenEmptySpaceMenu {
        /// Page coordinates of the click.
        position: MenuPosition,
        /// Whether the event target is the background container itself.
        target_is_background: bool,
    },
    /// The open menu was measured after mount.
    MenuMeasured {
        /// Rendered menu width and height.
        size: (i32, i32),
        /// Window inner width and height.
        viewport: (i32, i32),
    },
    /// Close both context menus.
    CloseMenus,
    /// Run a menu or toolbar command against the current selection.
    RunCommand(MenuCommand),
    /// Ask to empty the trash.
    RequestEmptyTrash,
    /// An item drag started on a row.
    DragStarted {
        /// Dragged item.
        id: ItemId,
    },
    /// A drag moved over the page, advertising `types`.
    PageDragOver {
        /// Data-transfer types of the drag.
        types: Vec<String>,
    },
    /// A drag left the page.
    PageDragLeft,
    /// The item drag ended, dropped or not.
    DragEnded,
    /// A drag entered a row.
    RowDragEnter {
        /// Row under the pointer.
        id: ItemId,
    },
    /// A drag left a row.
    RowDragLeave {
        /// Row that fired the event.
        id: ItemId,
        /// Whether the pointer is still over one of the row's children.
        still_inside: bool,
    },
    /// A drag was dropped on a row.
    DroppedOnRow {
        /// Row that received the drop.
        target: ItemId,
        /// Raw item payload, if the drag carried one.
        payload: Option<String>,
    },
    /// OS files were dropped on the listing background.
    FilesDropped {
        /// Files read from the drop.
        files: Vec<UploadFile>,
    },
    /// Files were picked through the upload button.
    UploadFiles {
        /// Files read from the picker.
        files: Vec<UploadFile>,
    },
    /// Update the name filter.
    SetSearch {
        /// Filter text.
        text: String,
    },
    /// Sort by a column, flipping direction when it is already active.
    SortBy {
        /// Column header that was clicked.
        column: SortColumn,
    },
    /// Open the create modal.
    OpenCreate {
        /// File or folder.
        kind: FileKind,
    },
    /// Edit the name field of the create, rename or public-share modal.
    EditModalName {
        /// New field value.
        value: String,
    },
    /// Edit the destination of the move modal.
    EditMoveDestination {
        /// New field value.
        value: String,
    },
    /// Toggle a recipient in the user-share modal.
    ToggleRecipient {
        /// User to toggle.
        user_id: u64,
    },
    /// Choose every listed recipient.
    SelectAllRecipients,
    /// Clear the chosen recipients.
    ClearRecipients,
    /// Submit the open modal.
    SubmitModal,
    /// Close the open modal.
    CloseModal,
    /// Delete the public link shown in the share modal.
    RevokePublicShare,
    /// Copy the public link shown in the share modal.
    CopyPublicLink {
        /// Absolute share URL.
        url: String,
    },
    /// Run the pending destructive request.
    ConfirmPending,
    /// Drop the pending destructive request.
    CancelPending,
    /// Remove a toast.
    DismissToast {
        /// Toast to remove.
        id: u64,
    },
    /// Show a toast.
    Notify {
        /// Toast level.
        level: ToastLevel,
        /// Toast text.
        message: String,
    },
    /// A mutation finished successfully.
    MutationSucceeded {
        /// Where the mutation started.
        origin: MutationOrigin,
        /// Success text.
        message: String,
    },
    /// A mutation failed.
    MutationFailed {
        /// Where the mutation started.
        origin: MutationOrigin,
        /// User-facing reason.
        message: String,
    },
    /// Every upload of a batch settled.
    UploadFinished {
        /// Loading toast to replace.
        toast_id: u64,
        /// Files in the batch.
        total: usize,
        /// Files that failed.
        failed: usize,
    },
    /// A public link was created.
    PublicShareCreated {
        /// Share token.
        token: String,
    },
    /// The public link was deleted.
    PublicShareRevoked,
    /// Creating or deleting a public link failed.
    PublicShareFailed {
        /// User-facing reason.
        message: String,
    },
    /// Recipients for the user-share modal were loaded.
    ShareUsersLoaded {
        /// Every account known to the backend.
        users: Vec<UserAccount>,
    },
    /// Loading recipients failed.
    ShareUsersFailed {
        /// User-facing reason.
        message: String,
    },
    /// Viewer content finished loading.
    PreviewLoaded {
        /// Source the content was loaded from.
        source: ContentSource,
        /// Loaded content or failure.
        content: PreviewState,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_file_manager`] for the effect executor to run.
pub enum FileManagerEffect {
    /// Look up the signed-in user.
    LoadCurrentUser,
    /// Fetch the listing for a view.
    LoadListing {
        /// Generation to echo back.
        generation: u64,
        /// View to list.
        view: ViewMode,
        /// Directory path for the directory view.
        location: String,
        /// Scope for the directory view.
        scope: FileScope,
    },
    /// Run a mutation, then report and re-fetch.
    Mutate(MutationRequest),
    /// Upload files concurrently and report one aggregate outcome.
    UploadBatch {
        /// Files to upload.
        files: Vec<UploadFile>,
        /// Target directory.
        destination: String,
        /// Target scope.
        scope: FileScope,
        /// Loading toast to replace with the outcome.
        toast_id: u64,
    },
    /// Create a public link.
    CreatePublicShare {
        /// Shared paths.
        paths: Vec<String>,
        /// Share display name.
        name: String,
        /// Scope of the paths.
        scope: FileScope,
    },
    /// Delete a public link.
    DeletePublicShare {
        /// Share token.
        token: String,
    },
    /// Load recipients for the user-share modal.
    LoadShareUsers,
    /// Load viewer content.
    LoadPreview {
        /// Content address.
        source: ContentSource,
        /// How the file will be shown.
        kind: PreviewKind,
        /// File name, used for the media MIME type.
        file_name: String,
        /// Listed size in bytes.
        size: u64,
    },
    /// Revoke an object URL created for the viewer.
    ReleaseObjectUrl {
        /// URL to revoke.
        url: String,
    },
    /// Write text to the system clipboard.
    WriteClipboard {
        /// Text to write.
        text: String,
        /// Toast shown once written.
        success: String,
        /// Toast shown when the write is refused.
        failure: String,
    },
    /// Download a shared file and save it locally.
    DownloadShared {
        /// Share record id.
        share_id: u64,
        /// File name to save under.
        name: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that do not apply to the current state.
pub enum ReducerError {
    /// The referenced item is not in the current listing.
    #[error("item not found")]
    ItemNotFound,
    /// The action is not available in the active view.
    #[error("action not allowed in the current view")]
    NotAllowedInView,
    /// The signed-in user lacks the privilege for the action.
    #[error("not permitted")]
    NotPermitted,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Input problems caught before any remote call. The message is shown to the user.
pub enum ValidationError {
    #[error("Name cannot be empty.")]
    EmptyName,
    #[error("Destination path cannot be empty.")]
    EmptyDestination,
    #[error("Share name cannot be empty.")]
    EmptyShareName,
    #[error("Please select at least one user to share with.")]
    NoRecipients,
    #[error("Cannot move an item into itself.")]
    SelfMove,
    #[error("Cannot move items between the system root and your home folder.")]
    CrossScopeMove,
    #[error("Cannot paste into this view.")]
    PasteNotAllowed,
    #[error("Cannot browse subfolders directly in this view. Please download or view the item.")]
    BrowseNotAllowed,
    #[error("Cannot view directories directly. Please download.")]
    DirectoryPreview,
    #[error("Failed to move item(s).")]
    InvalidDragPayload,
}

/// Applies a [`FileManagerAction`] to the page state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError`] when an action references an item that is no longer listed, is not
/// available in the active view, or needs admin rights. State is left unchanged in that case.
pub fn reduce_file_manager(
    state: &mut FileManagerState,
    interaction: &mut InteractionState,
    action: FileManagerAction,
) -> Result<Vec<FileManagerEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        FileManagerAction::Boot => {
            effects.push(FileManagerEffect::LoadCurrentUser);
            effects.push(start_listing(state));
        }
        FileManagerAction::CurrentUserLoaded { user } => {
            state.user = user;
            if state.scope == FileScope::SystemRoot && !state.is_admin() {
                state.scope = FileScope::Home;
                effects.push(enter_location(state, interaction, "/"));
            }
        }
        FileManagerAction::Navigate { location } => {
            effects.push(enter_location(state, interaction, &location));
        }
        FileManagerAction::GoUp => {
            if state.view.is_restricted() {
                return Err(ReducerError::NotAllowedInView);
            }
            if state.can_go_up() {
                let parent = parent_path(&state.location);
                effects.push(enter_location(state, interaction, &parent));
            }
        }
        FileManagerAction::Refresh => effects.push(start_listing(state)),
        FileManagerAction::SwitchScope { scope } => {
            if scope == FileScope::SystemRoot && !state.is_admin() {
                return Err(ReducerError::NotPermitted);
            }
            state.scope = scope;
            effects.push(enter_location(state, interaction, "/"));
        }
        FileManagerAction::ListingLoaded { generation, items } => {
            if generation == state.generation {
                state.items = items;
                state.loading = false;
                state.load_error = None;
                state.selection.clear();
                state.query = Default::default();
                state.menu = None;
            }
        }
        FileManagerAction::ListingFailed {
            generation,
            message,
        } => {
            if generation == state.generation {
                state.loading = false;
                state.items.clear();
                state.selection.clear();
                if state.view == ViewMode::Directory && state.location != "/" {
                    state.toasts.error(message);
                    effects.push(enter_location(state, interaction, "/"));
                } else {
                    state.load_error = Some(message);
                }
            }
        }
        FileManagerAction::ItemClicked { id, modifiers } => {
            let displayed = state.displayed_ids();
            if !displayed.contains(&id) {
                return Err(ReducerError::ItemNotFound);
            }
            state.menu = None;
            // The copy/cut buffer survives clicks; only a successful paste empties it.
            state.selection.handle_item_click(&id, modifiers, &displayed);
        }
        FileManagerAction::ItemDoubleClicked { id } => {
            let item = state.find_item(&id).ok_or(ReducerError::ItemNotFound)?.clone();
            if item.is_dir() {
                match state.view {
                    ViewMode::Directory => {
                        effects.push(enter_location(state, interaction, item.path()));
                    }
                    ViewMode::SharedWithMe | ViewMode::MyShares => {
                        state
                            .toasts
                            .error(ValidationError::BrowseNotAllowed.to_string());
                    }
                    ViewMode::Trash => {}
                }
            } else if state.view != ViewMode::Trash {
                effects.extend(commands::open_viewer(state, &item)?);
            }
        }
        FileManagerAction::BackgroundClicked => {
            state.selection.clear();
            state.menu = None;
        }
        FileManagerAction::DocumentClicked | FileManagerAction::CloseMenus => {
            state.menu = None;
        }
        FileManagerAction::SelectAll => {
            let displayed = state.displayed_ids();
            state.selection.select_all(&displayed);
        }
        FileManagerAction::OpenItemMenu { id, position } => {
            context_menu::open_item_menu(state, &id, position)?;
        }
        FileManagerAction::OpenEmptySpaceMenu {
            position,
            target_is_background,
        } => context_menu::open_empty_space_menu(state, position, target_is_background),
        FileManagerAction::MenuMeasured { size, viewport } => {
            if let Some(menu) = state.menu.as_mut() {
                menu.position = context_menu::clamp_to_viewport(menu.position, size, viewport);
            }
        }
        FileManagerAction::RunCommand(command) => {
            state.menu = None;
            effects.extend(commands::run_command(state, command)?);
        }
        FileManagerAction::RequestEmptyTrash => {
            if state.view != ViewMode::Trash {
                return Err(ReducerError::NotAllowedInView);
            }
            commands::request_empty_trash(state);
        }
        FileManagerAction::DragStarted { id } => {
            if let Some(start) = drag::begin_drag(state, &id) {
                if let Some(collapsed) = start.collapse_selection_to {
                    state.selection.select_only(collapsed);
                }
            }
        }
        FileManagerAction::PageDragOver { types } => {
            if drag::accepts_native_files(state.view, &types) {
                interaction.dragging_files = true;
            }
        }
        FileManagerAction::PageDragLeft | FileManagerAction::DragEnded => {
            interaction.dragging_files = false;
            interaction.drop_target = None;
        }
        FileManagerAction::RowDragEnter { id } => {
            let is_folder = state.find_item(&id).is_some_and(FileItem::is_dir);
            if is_folder && !state.view.is_restricted() {
                interaction.drop_target = Some(id);
            }
        }
        FileManagerAction::RowDragLeave { id, still_inside } => {
            if !still_inside && interaction.drop_target.as_ref() == Some(&id) {
                interaction.drop_target = None;
            }
        }
        FileManagerAction::DroppedOnRow { target, payload } => {
            interaction.drop_target = None;
            interaction.dragging_files = false;
            // A row that vanished mid-drag is a silent no-op.
            if let Some(item) = state.find_item(&target).cloned() {
                effects.extend(drop_on_row(state, &item, payload.as_deref()));
            }
        }
        FileManagerAction::FilesDropped { files } => {
            interaction.dragging_files = false;
            interaction.drop_target = None;
            if !state.view.is_restricted() {
                effects.extend(commands::upload(state, files));
            }
        }
        FileManagerAction::UploadFiles { files } => {
            if state.view.is_restricted() {
                return Err(ReducerError::NotAllowedInView);
            }
            effects.extend(commands::upload(state, files));
        }
        FileManagerAction::SetSearch { text } => state.query.search = text,
        FileManagerAction::SortBy { column } => state.query.toggle_sort(column),
        FileManagerAction::OpenCreate { kind } => effects.extend(modals::open_create(state, kind)?),
        FileManagerAction::EditModalName { value } => modals::edit_name(state, value),
        FileManagerAction::EditMoveDestination { value } => modals::edit_destination(state, value),
        FileManagerAction::ToggleRecipient { user_id } => modals::toggle_recipient(state, user_id),
        FileManagerAction::SelectAllRecipients => modals::select_all_recipients(state),
        FileManagerAction::ClearRecipients => modals::clear_recipients(state),
        FileManagerAction::SubmitModal => effects.extend(modals::submit(state)),
        FileManagerAction::CloseModal => effects.extend(modals::close(state)),
        FileManagerAction::RevokePublicShare => effects.extend(modals::revoke_public_share(state)),
        FileManagerAction::CopyPublicLink { url } => {
            effects.push(FileManagerEffect::WriteClipboard {
                text: url,
                success: "Link copied to clipboard.".to_string(),
                failure: "Failed to copy link.".to_string(),
            });
        }
        FileManagerAction::ConfirmPending => {
            if let Some(pending) = state.confirmation.take() {
                effects.push(FileManagerEffect::Mutate(pending.request));
            }
        }
        FileManagerAction::CancelPending => state.confirmation = None,
        FileManagerAction::DismissToast { id } => {
            state.toasts.dismiss(id);
        }
        FileManagerAction::Notify { level, message } => {
            state.toasts.push(level, message);
        }
        FileManagerAction::MutationSucceeded { origin, message } => {
            effects.extend(completions::mutation_succeeded(state, origin, message));
        }
        FileManagerAction::MutationFailed { origin, message } => {
            completions::mutation_failed(state, origin, message);
        }
        FileManagerAction::UploadFinished {
            toast_id,
            total,
            failed,
        } => effects.extend(completions::upload_finished(state, toast_id, total, failed)),
        FileManagerAction::PublicShareCreated { token } => {
            completions::public_share_created(state, token);
        }
        FileManagerAction::PublicShareRevoked => completions::public_share_revoked(state),
        FileManagerAction::PublicShareFailed { message } => {
            completions::public_share_failed(state, message);
        }
        FileManagerAction::ShareUsersLoaded { users } => {
            completions::share_users_loaded(state, users);
        }
        FileManagerAction::ShareUsersFailed { message } => {
            completions::share_users_failed(state, message);
        }
        FileManagerAction::PreviewLoaded { source, content } => {
            effects.extend(completions::preview_loaded(state, source, content));
        }
    }
    Ok(effects)
}

/// Issues a listing request under a fresh generation.
fn start_listing(state: &mut FileManagerState) -> FileManagerEffect {
    state.generation += 1;
    state.loading = true;
    state.load_error = None;
    FileManagerEffect::LoadListing {
        generation: state.generation,
        view: state.view,
        location: state.location.clone(),
        scope: state.scope,
    }
}

/// Switches to `location`, dropping everything tied to the previous listing.
fn enter_location(
    state: &mut FileManagerState,
    interaction: &mut InteractionState,
    location: &str,
) -> FileManagerEffect {
    let view = ViewMode::resolve(location.trim());
    state.location = match view.token() {
        Some(token) => token.to_string(),
        None => normalize_virtual_path(location),
    };
    state.view = view;
    state.items.clear();
    state.selection.reset();
    state.menu = None;
    *interaction = InteractionState::default();
    start_listing(state)
}

fn drop_on_row(
    state: &mut FileManagerState,
    target: &FileItem,
    payload: Option<&str>,
) -> Option<FileManagerEffect> {
    match drag::decide_folder_drop(state.view, state.scope, target, payload) {
        DropDecision::Ignore => None,
        DropDecision::Reject(err) => {
            state.toasts.error(err.to_string());
            None
        }
        DropDecision::Move {
            sources,
            destination,
            destination_name,
        } => {
            let count = sources.len();
            Some(FileManagerEffect::Mutate(MutationRequest {
                mutation: Mutation::Move {
                    sources,
                    destination,
                },
                scope: state.scope,
                origin: MutationOrigin::Direct,
                success: format!("{count} item(s) moved to {destination_name}"),
                failure: "Failed to move item(s).".to_string(),
            }))
        }
    }
}

#[cfg(test)]
mod tests;
