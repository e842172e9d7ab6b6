use platform_host::{ContentSource, FileKind, FileScope, UploadFile, UserAccount};
use pretty_assertions::assert_eq;

use super::*;
use crate::{
    context_menu::{MenuKind, MenuPosition},
    drag::{DragPayload, DRAG_PAYLOAD_MIME, NATIVE_FILES_TYPE},
    model::{
        tests::{dir_item, my_share_item, numbered_items, shared_item, trash_item},
        Clipboard, Modal,
    },
};

fn directory_state(items: Vec<FileItem>) -> FileManagerState {
    FileManagerState {
        items,
        ..FileManagerState::default()
    }
}

fn reduce(state: &mut FileManagerState, action: FileManagerAction) -> Vec<FileManagerEffect> {
    let mut interaction = InteractionState::default();
    reduce_file_manager(state, &mut interaction, action).expect("reduce")
}

fn path_id(path: &str) -> ItemId {
    ItemId::Path(path.to_string())
}

fn click(state: &mut FileManagerState, path: &str, modifiers: ClickModifiers) {
    reduce(
        state,
        FileManagerAction::ItemClicked {
            id: path_id(path),
            modifiers,
        },
    );
}

fn drop_payload(paths: &[&str], scope: FileScope) -> Option<String> {
    let paths = paths.iter().map(|path| path.to_string()).collect();
    Some(DragPayload::new(paths, scope).to_json().expect("payload"))
}

fn user(id: u64, username: &str, role: &str) -> UserAccount {
    UserAccount {
        id,
        username: username.to_string(),
        role: role.to_string(),
    }
}

fn upload_file(name: &str) -> UploadFile {
    UploadFile {
        name: name.to_string(),
        bytes: b"data".to_vec(),
    }
}

#[test]
fn boot_loads_user_and_first_listing() {
    let mut state = FileManagerState::default();
    let effects = reduce(&mut state, FileManagerAction::Boot);
    assert_eq!(
        effects,
        vec![
            FileManagerEffect::LoadCurrentUser,
            FileManagerEffect::LoadListing {
                generation: 1,
                view: ViewMode::Directory,
                location: "/".to_string(),
                scope: FileScope::Home,
            },
        ]
    );
    assert!(state.loading);
}

#[test]
fn switching_view_empties_the_selection() {
    let mut state = directory_state(numbered_items(5));
    click(&mut state, "/i0", ClickModifiers::NONE);
    click(&mut state, "/i1", ClickModifiers::CTRL);
    click(&mut state, "/i2", ClickModifiers::CTRL);
    assert_eq!(state.selection.len(), 3);

    let effects = reduce(
        &mut state,
        FileManagerAction::Navigate {
            location: "trash".to_string(),
        },
    );

    assert!(state.selection.is_empty());
    assert_eq!(state.selection.anchor(), None);
    assert_eq!(state.view, ViewMode::Trash);
    assert_eq!(state.location, "trash");
    assert!(state.items.is_empty());
    assert_eq!(
        effects,
        vec![FileManagerEffect::LoadListing {
            generation: 1,
            view: ViewMode::Trash,
            location: "trash".to_string(),
            scope: FileScope::Home,
        }]
    );
}

#[test]
fn navigation_normalizes_directory_paths() {
    let mut state = FileManagerState::default();
    reduce(
        &mut state,
        FileManagerAction::Navigate {
            location: "docs//reports/".to_string(),
        },
    );
    assert_eq!(state.location, "/docs/reports");

    reduce(&mut state, FileManagerAction::GoUp);
    assert_eq!(state.location, "/docs");
}

#[test]
fn stale_listing_responses_are_dropped() {
    let mut state = FileManagerState::default();
    reduce(&mut state, FileManagerAction::Refresh);
    reduce(&mut state, FileManagerAction::Refresh);
    assert_eq!(state.generation, 2);

    reduce(
        &mut state,
        FileManagerAction::ListingLoaded {
            generation: 1,
            items: numbered_items(3),
        },
    );
    assert!(state.items.is_empty());
    assert!(state.loading);

    reduce(
        &mut state,
        FileManagerAction::ListingLoaded {
            generation: 2,
            items: numbered_items(2),
        },
    );
    assert_eq!(state.items.len(), 2);
    assert!(!state.loading);
}

#[test]
fn fresh_listing_clears_selection_and_query_but_keeps_anchor() {
    let mut state = directory_state(numbered_items(4));
    click(&mut state, "/i1", ClickModifiers::NONE);
    reduce(
        &mut state,
        FileManagerAction::SetSearch {
            text: "i".to_string(),
        },
    );
    let effects = reduce(&mut state, FileManagerAction::Refresh);
    let FileManagerEffect::LoadListing { generation, .. } = effects[0].clone() else {
        panic!("expected listing effect");
    };

    reduce(
        &mut state,
        FileManagerAction::ListingLoaded {
            generation,
            items: numbered_items(4),
        },
    );
    assert!(state.selection.is_empty());
    assert_eq!(state.selection.anchor(), Some(&path_id("/i1")));
    assert_eq!(state.query, Default::default());

    // The kept anchor still drives a shift range after the reload.
    click(&mut state, "/i3", ClickModifiers::SHIFT);
    assert_eq!(state.selection.len(), 3);
}

#[test]
fn failed_subdirectory_listing_falls_back_to_root() {
    let mut state = FileManagerState {
        location: "/gone".to_string(),
        generation: 4,
        ..FileManagerState::default()
    };
    let effects = reduce(
        &mut state,
        FileManagerAction::ListingFailed {
            generation: 4,
            message: "Path not found".to_string(),
        },
    );
    assert_eq!(state.location, "/");
    assert_eq!(state.toasts.last().map(|t| t.message.as_str()), Some("Path not found"));
    assert_eq!(state.load_error, None);
    assert_eq!(effects.len(), 1);

    let root_generation = state.generation;
    let effects = reduce(
        &mut state,
        FileManagerAction::ListingFailed {
            generation: root_generation,
            message: "Failed to load directory.".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.load_error.as_deref(), Some("Failed to load directory."));
}

#[test]
fn ctrl_clicking_twice_restores_empty_selection() {
    let mut state = directory_state(numbered_items(3));
    click(&mut state, "/i1", ClickModifiers::CTRL);
    click(&mut state, "/i1", ClickModifiers::CTRL);
    assert!(state.selection.is_empty());
}

#[test]
fn clicking_an_unlisted_item_is_an_error() {
    let mut state = directory_state(numbered_items(2));
    let mut interaction = InteractionState::default();
    let result = reduce_file_manager(
        &mut state,
        &mut interaction,
        FileManagerAction::ItemClicked {
            id: path_id("/missing"),
            modifiers: ClickModifiers::NONE,
        },
    );
    assert_eq!(result, Err(ReducerError::ItemNotFound));
}

#[test]
fn shift_click_with_removed_anchor_selects_only_the_clicked_item() {
    let mut state = directory_state(numbered_items(6));
    click(&mut state, "/i2", ClickModifiers::NONE);
    state.items.retain(|item| item.path() != "/i2");

    click(&mut state, "/i4", ClickModifiers::SHIFT);
    assert_eq!(state.selection.ids().cloned().collect::<Vec<_>>(), vec![path_id("/i4")]);
}

#[test]
fn dropping_a_folder_onto_itself_does_nothing() {
    let mut state = directory_state(vec![dir_item("/docs", true)]);
    let effects = reduce(
        &mut state,
        FileManagerAction::DroppedOnRow {
            target: path_id("/docs"),
            payload: drop_payload(&["/docs"], FileScope::Home),
        },
    );
    assert!(effects.is_empty());
    assert!(state.toasts.is_empty());
}

#[test]
fn dropping_across_scopes_is_refused_with_a_toast() {
    let mut state = directory_state(vec![dir_item("/docs", true)]);
    let effects = reduce(
        &mut state,
        FileManagerAction::DroppedOnRow {
            target: path_id("/docs"),
            payload: drop_payload(&["/etc/hosts"], FileScope::SystemRoot),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.toasts.last().map(|t| (t.level, t.message.clone())),
        Some((
            ToastLevel::Error,
            "Cannot move items between the system root and your home folder.".to_string()
        ))
    );
}

#[test]
fn dropping_onto_a_folder_moves_the_dragged_items() {
    let mut state = directory_state(vec![dir_item("/docs", true), dir_item("/a.txt", false)]);
    let mut interaction = InteractionState {
        dragging_files: false,
        drop_target: Some(path_id("/docs")),
    };
    let effects = reduce_file_manager(
        &mut state,
        &mut interaction,
        FileManagerAction::DroppedOnRow {
            target: path_id("/docs"),
            payload: drop_payload(&["/a.txt"], FileScope::Home),
        },
    )
    .expect("reduce");

    assert_eq!(interaction.drop_target, None);
    assert_eq!(
        effects,
        vec![FileManagerEffect::Mutate(MutationRequest {
            mutation: Mutation::Move {
                sources: vec!["/a.txt".to_string()],
                destination: "/docs".to_string(),
            },
            scope: FileScope::Home,
            origin: MutationOrigin::Direct,
            success: "1 item(s) moved to docs".to_string(),
            failure: "Failed to move item(s).".to_string(),
        })]
    );
}

#[test]
fn row_highlight_survives_leaving_into_a_child_element() {
    let mut state = directory_state(vec![dir_item("/docs", true), dir_item("/a.txt", false)]);
    let mut interaction = InteractionState::default();
    for action in [
        FileManagerAction::RowDragEnter { id: path_id("/a.txt") },
        FileManagerAction::RowDragEnter { id: path_id("/docs") },
        FileManagerAction::RowDragLeave {
            id: path_id("/docs"),
            still_inside: true,
        },
    ] {
        reduce_file_manager(&mut state, &mut interaction, action).expect("reduce");
    }
    assert_eq!(interaction.drop_target, Some(path_id("/docs")));

    reduce_file_manager(
        &mut state,
        &mut interaction,
        FileManagerAction::RowDragLeave {
            id: path_id("/docs"),
            still_inside: false,
        },
    )
    .expect("reduce");
    assert_eq!(interaction.drop_target, None);
}

#[test]
fn opening_one_menu_closes_the_other() {
    let mut state = directory_state(numbered_items(3));
    reduce(
        &mut state,
        FileManagerAction::OpenItemMenu {
            id: path_id("/i1"),
            position: MenuPosition { x: 10, y: 20 },
        },
    );
    assert_eq!(state.menu.map(|menu| menu.kind), Some(MenuKind::Item));
    assert!(state.selection.contains(&path_id("/i1")));

    reduce(
        &mut state,
        FileManagerAction::OpenEmptySpaceMenu {
            position: MenuPosition { x: 50, y: 60 },
            target_is_background: true,
        },
    );
    let menu = state.menu.expect("menu");
    assert_eq!(menu.kind, MenuKind::EmptySpace);
    assert_eq!(menu.position, MenuPosition { x: 50, y: 60 });
    assert!(state.selection.is_empty());

    reduce(
        &mut state,
        FileManagerAction::MenuMeasured {
            size: (100, 100),
            viewport: (120, 140),
        },
    );
    assert_eq!(
        state.menu.map(|menu| menu.position),
        Some(MenuPosition { x: 20, y: 40 })
    );
}

fn open_item_menu(state: &mut FileManagerState, path: &str) {
    reduce(
        state,
        FileManagerAction::OpenItemMenu {
            id: path_id(path),
            position: MenuPosition { x: 10, y: 20 },
        },
    );
    assert!(state.menu.is_some());
}

#[test]
fn background_click_clears_selection_and_menu() {
    let mut state = directory_state(numbered_items(3));
    click(&mut state, "/i0", ClickModifiers::NONE);
    open_item_menu(&mut state, "/i0");

    reduce(&mut state, FileManagerAction::BackgroundClicked);

    assert!(state.selection.is_empty());
    assert_eq!(state.menu, None);
}

#[test]
fn document_click_and_close_request_only_close_the_menu() {
    for action in [FileManagerAction::DocumentClicked, FileManagerAction::CloseMenus] {
        let mut state = directory_state(numbered_items(3));
        open_item_menu(&mut state, "/i1");

        reduce(&mut state, action);

        assert_eq!(state.menu, None);
        assert!(state.selection.contains(&path_id("/i1")));
    }
}

#[test]
fn dragging_an_unselected_item_collapses_the_selection_onto_it() {
    let mut state = directory_state(numbered_items(4));
    click(&mut state, "/i0", ClickModifiers::NONE);
    click(&mut state, "/i1", ClickModifiers::CTRL);

    reduce(&mut state, FileManagerAction::DragStarted { id: path_id("/i1") });
    assert_eq!(state.selection.len(), 2);

    reduce(&mut state, FileManagerAction::DragStarted { id: path_id("/i3") });
    assert_eq!(
        state.selection.ids().cloned().collect::<Vec<_>>(),
        vec![path_id("/i3")]
    );
    assert_eq!(state.selection.anchor(), Some(&path_id("/i3")));
}

#[test]
fn only_native_file_drags_highlight_the_directory_view() {
    let mut state = directory_state(numbered_items(2));
    let mut interaction = InteractionState::default();
    let drag_over = |types: &[&str]| FileManagerAction::PageDragOver {
        types: types.iter().map(|kind| kind.to_string()).collect(),
    };

    reduce_file_manager(&mut state, &mut interaction, drag_over(&[DRAG_PAYLOAD_MIME]))
        .expect("reduce");
    assert!(!interaction.dragging_files);

    reduce_file_manager(&mut state, &mut interaction, drag_over(&[NATIVE_FILES_TYPE]))
        .expect("reduce");
    assert!(interaction.dragging_files);

    reduce_file_manager(&mut state, &mut interaction, FileManagerAction::PageDragLeft)
        .expect("reduce");
    assert!(!interaction.dragging_files);

    let mut trash = FileManagerState {
        view: ViewMode::Trash,
        location: "trash".to_string(),
        items: vec![trash_item("a.txt_1", "/a.txt")],
        ..FileManagerState::default()
    };
    reduce_file_manager(&mut trash, &mut interaction, drag_over(&[NATIVE_FILES_TYPE]))
        .expect("reduce");
    assert!(!interaction.dragging_files);
}

#[test]
fn delete_waits_for_confirmation() {
    let mut state = directory_state(numbered_items(3));
    reduce(&mut state, FileManagerAction::SelectAll);

    let effects = reduce(&mut state, FileManagerAction::RunCommand(MenuCommand::Delete));
    assert!(effects.is_empty());
    let pending = state.confirmation.clone().expect("confirmation");
    assert_eq!(
        pending.message,
        "Are you sure you want to move 3 item(s) to the trash?"
    );

    let effects = reduce(&mut state, FileManagerAction::ConfirmPending);
    assert_eq!(state.confirmation, None);
    assert_eq!(
        effects,
        vec![FileManagerEffect::Mutate(MutationRequest {
            mutation: Mutation::Trash {
                paths: vec!["/i0".to_string(), "/i1".to_string(), "/i2".to_string()],
            },
            scope: FileScope::Home,
            origin: MutationOrigin::Direct,
            success: "3 item(s) deleted.".to_string(),
            failure: "Failed to complete the delete operation.".to_string(),
        })]
    );
}

#[test]
fn cancelled_confirmation_emits_nothing() {
    let mut state = directory_state(numbered_items(1));
    reduce(&mut state, FileManagerAction::SelectAll);
    reduce(&mut state, FileManagerAction::RunCommand(MenuCommand::Delete));
    reduce(&mut state, FileManagerAction::CancelPending);
    assert_eq!(state.confirmation, None);
    assert!(reduce(&mut state, FileManagerAction::ConfirmPending).is_empty());
}

#[test]
fn trash_operations_use_trashed_names() {
    let mut state = FileManagerState {
        view: ViewMode::Trash,
        location: "trash".to_string(),
        items: vec![
            trash_item("a.txt_1700000000", "/a.txt"),
            trash_item("b.txt_1700000001", "/b.txt"),
        ],
        ..FileManagerState::default()
    };
    reduce(&mut state, FileManagerAction::SelectAll);

    let effects = reduce(&mut state, FileManagerAction::RunCommand(MenuCommand::Restore));
    assert_eq!(
        effects,
        vec![FileManagerEffect::Mutate(MutationRequest {
            mutation: Mutation::Restore {
                trashed_names: vec![
                    "a.txt_1700000000".to_string(),
                    "b.txt_1700000001".to_string()
                ],
            },
            scope: FileScope::Home,
            origin: MutationOrigin::Direct,
            success: "2 item(s) restored.".to_string(),
            failure: "Failed to restore one or more items.".to_string(),
        })]
    );

    reduce(&mut state, FileManagerAction::RunCommand(MenuCommand::DeletePermanently));
    assert_eq!(
        state.confirmation.map(|pending| pending.request.mutation),
        Some(Mutation::DeletePermanently {
            trashed_names: vec![
                "a.txt_1700000000".to_string(),
                "b.txt_1700000001".to_string()
            ],
        })
    );
}

#[test]
fn bulk_unshare_revokes_every_selected_share() {
    let mut state = FileManagerState {
        view: ViewMode::MyShares,
        location: "my-shares".to_string(),
        items: vec![
            my_share_item(4, "docs/a.txt"),
            my_share_item(7, "docs/b.txt"),
            my_share_item(9, "docs/c.txt"),
        ],
        ..FileManagerState::default()
    };
    for (id, modifiers) in [(4, ClickModifiers::NONE), (9, ClickModifiers::CTRL)] {
        reduce(
            &mut state,
            FileManagerAction::ItemClicked {
                id: ItemId::Share(id),
                modifiers,
            },
        );
    }

    assert!(reduce(&mut state, FileManagerAction::RunCommand(MenuCommand::Unshare)).is_empty());
    assert_eq!(
        state.confirmation.as_ref().map(|pending| pending.message.as_str()),
        Some("Are you sure you want to unshare 2 item(s)? This will revoke access for the recipients.")
    );

    let effects = reduce(&mut state, FileManagerAction::ConfirmPending);
    assert_eq!(
        effects,
        vec![FileManagerEffect::Mutate(MutationRequest {
            mutation: Mutation::Unshare {
                share_ids: vec![4, 9],
            },
            scope: FileScope::Home,
            origin: MutationOrigin::Direct,
            success: "2 item(s) removed/unshared successfully.".to_string(),
            failure: "Failed to remove/unshare item(s).".to_string(),
        })]
    );
}

#[test]
fn empty_trash_asks_only_when_something_is_there() {
    let mut state = FileManagerState {
        view: ViewMode::Trash,
        location: "trash".to_string(),
        ..FileManagerState::default()
    };
    reduce(&mut state, FileManagerAction::RequestEmptyTrash);
    assert_eq!(state.confirmation, None);

    state.items = vec![trash_item("a.txt_1", "/a.txt")];
    reduce(&mut state, FileManagerAction::RequestEmptyTrash);
    assert_eq!(
        state.confirmation.map(|pending| pending.request.mutation),
        Some(Mutation::EmptyTrash)
    );
}

#[test]
fn clipboard_commands_are_refused_in_restricted_views() {
    let mut state = FileManagerState {
        view: ViewMode::SharedWithMe,
        location: "shared-with-me".to_string(),
        items: vec![shared_item(7, "docs/a.txt")],
        ..FileManagerState::default()
    };
    reduce(&mut state, FileManagerAction::SelectAll);
    let mut interaction = InteractionState::default();
    assert_eq!(
        reduce_file_manager(
            &mut state,
            &mut interaction,
            FileManagerAction::RunCommand(MenuCommand::Copy)
        ),
        Err(ReducerError::NotAllowedInView)
    );
    assert!(state.clipboard.is_empty());

    let effects = reduce(&mut state, FileManagerAction::RunCommand(MenuCommand::CopyPaths));
    assert_eq!(
        effects,
        vec![FileManagerEffect::WriteClipboard {
            text: "alice:docs/a.txt".to_string(),
            success: "Path(s) copied to clipboard.".to_string(),
            failure: "Failed to copy paths.".to_string(),
        }]
    );
}

#[test]
fn copy_then_paste_copies_into_current_folder_and_clears_buffer() {
    let mut state = directory_state(numbered_items(2));
    reduce(&mut state, FileManagerAction::SelectAll);
    reduce(&mut state, FileManagerAction::RunCommand(MenuCommand::Copy));
    assert_eq!(
        state.clipboard,
        Clipboard::Copy {
            paths: vec!["/i0".to_string(), "/i1".to_string()],
            scope: FileScope::Home,
        }
    );
    assert_eq!(
        state.toasts.last().map(|t| t.message.as_str()),
        Some("2 item(s) copied.")
    );

    reduce(
        &mut state,
        FileManagerAction::Navigate {
            location: "/backup".to_string(),
        },
    );
    let effects = reduce(&mut state, FileManagerAction::RunCommand(MenuCommand::Paste));
    let [FileManagerEffect::Mutate(request)] = effects.as_slice() else {
        panic!("expected one mutation, got {effects:?}");
    };
    assert_eq!(
        request.mutation,
        Mutation::Copy {
            sources: vec!["/i0".to_string(), "/i1".to_string()],
            destination: "/backup".to_string(),
        }
    );
    assert_eq!(request.origin, MutationOrigin::Paste);

    let effects = reduce(
        &mut state,
        FileManagerAction::MutationSucceeded {
            origin: MutationOrigin::Paste,
            message: request.success.clone(),
        },
    );
    assert!(state.clipboard.is_empty());
    assert!(matches!(
        effects.as_slice(),
        [FileManagerEffect::LoadListing { .. }]
    ));
}

#[test]
fn paste_into_another_scope_is_refused() {
    let mut state = FileManagerState {
        clipboard: Clipboard::Cut {
            paths: vec!["/etc/hosts".to_string()],
            scope: FileScope::SystemRoot,
        },
        ..FileManagerState::default()
    };
    let effects = reduce(&mut state, FileManagerAction::RunCommand(MenuCommand::Paste));
    assert!(effects.is_empty());
    assert_eq!(state.toasts.count(ToastLevel::Error), 1);
    assert!(!state.clipboard.is_empty());
}

#[test]
fn plain_click_keeps_the_clipboard_buffer() {
    let mut state = directory_state(numbered_items(2));
    let buffer = Clipboard::Cut {
        paths: vec!["/i0".to_string()],
        scope: FileScope::Home,
    };
    state.clipboard = buffer.clone();
    click(&mut state, "/i1", ClickModifiers::NONE);
    click(&mut state, "/i0", ClickModifiers::CTRL);
    reduce(&mut state, FileManagerAction::BackgroundClicked);
    assert_eq!(state.clipboard, buffer);
}

#[test]
fn create_modal_validates_and_reports_failures_inline() {
    let mut state = FileManagerState::default();
    reduce(&mut state, FileManagerAction::OpenCreate { kind: FileKind::File });

    assert!(reduce(&mut state, FileManagerAction::SubmitModal).is_empty());
    assert_eq!(
        state.modal.as_ref().and_then(|open| open.error.clone()),
        Some("Name cannot be empty.".to_string())
    );

    reduce(
        &mut state,
        FileManagerAction::EditModalName {
            value: " notes.txt ".to_string(),
        },
    );
    let effects = reduce(&mut state, FileManagerAction::SubmitModal);
    assert_eq!(
        effects,
        vec![FileManagerEffect::Mutate(MutationRequest {
            mutation: Mutation::Create {
                parent: "/".to_string(),
                name: "notes.txt".to_string(),
                kind: FileKind::File,
            },
            scope: FileScope::Home,
            origin: MutationOrigin::Modal,
            success: "'notes.txt' created successfully.".to_string(),
            failure: "Failed to create file.".to_string(),
        })]
    );
    assert!(state.modal.as_ref().is_some_and(|open| open.busy));
    assert!(reduce(&mut state, FileManagerAction::SubmitModal).is_empty());

    reduce(
        &mut state,
        FileManagerAction::MutationFailed {
            origin: MutationOrigin::Modal,
            message: "File already exists".to_string(),
        },
    );
    let open = state.modal.clone().expect("modal stays open");
    assert!(!open.busy);
    assert_eq!(open.error.as_deref(), Some("File already exists"));

    reduce(&mut state, FileManagerAction::SubmitModal);
    reduce(
        &mut state,
        FileManagerAction::MutationSucceeded {
            origin: MutationOrigin::Modal,
            message: "'notes.txt' created successfully.".to_string(),
        },
    );
    assert_eq!(state.modal, None);
}

#[test]
fn unchanged_rename_closes_without_a_request() {
    let mut state = directory_state(vec![dir_item("/a.txt", false)]);
    click(&mut state, "/a.txt", ClickModifiers::NONE);
    reduce(&mut state, FileManagerAction::RunCommand(MenuCommand::Rename));
    assert!(matches!(
        state.modal.as_ref().map(|open| &open.modal),
        Some(Modal::Rename { .. })
    ));

    assert!(reduce(&mut state, FileManagerAction::SubmitModal).is_empty());
    assert_eq!(state.modal, None);
}

#[test]
fn move_modal_refuses_moving_a_folder_into_itself() {
    let mut state = directory_state(vec![dir_item("/docs", true)]);
    click(&mut state, "/docs", ClickModifiers::NONE);
    reduce(&mut state, FileManagerAction::RunCommand(MenuCommand::MoveTo));
    reduce(
        &mut state,
        FileManagerAction::EditMoveDestination {
            value: "/docs/archive".to_string(),
        },
    );

    assert!(reduce(&mut state, FileManagerAction::SubmitModal).is_empty());
    assert_eq!(
        state.modal.and_then(|open| open.error),
        Some("Cannot move an item into itself.".to_string())
    );
}

#[test]
fn share_with_users_excludes_me_and_needs_a_recipient() {
    let mut state = directory_state(vec![dir_item("/a.txt", false)]);
    state.user = Some(user(1, "me", "user"));
    click(&mut state, "/a.txt", ClickModifiers::NONE);

    let effects = reduce(
        &mut state,
        FileManagerAction::RunCommand(MenuCommand::ShareWithUsers),
    );
    assert_eq!(effects, vec![FileManagerEffect::LoadShareUsers]);

    reduce(
        &mut state,
        FileManagerAction::ShareUsersLoaded {
            users: vec![user(1, "me", "user"), user(2, "bob", "user")],
        },
    );
    assert!(reduce(&mut state, FileManagerAction::SubmitModal).is_empty());
    let Some(Modal::ShareWithUsers { users, .. }) = state.modal.as_ref().map(|open| &open.modal)
    else {
        panic!("share modal closed");
    };
    assert_eq!(users, &vec![user(2, "bob", "user")]);
    assert_eq!(
        state.modal.as_ref().and_then(|open| open.error.clone()),
        Some("Please select at least one user to share with.".to_string())
    );

    reduce(&mut state, FileManagerAction::SelectAllRecipients);
    let effects = reduce(&mut state, FileManagerAction::SubmitModal);
    assert_eq!(
        effects,
        vec![FileManagerEffect::Mutate(MutationRequest {
            mutation: Mutation::ShareWithUsers {
                paths: vec!["/a.txt".to_string()],
                user_ids: vec![2],
            },
            scope: FileScope::Home,
            origin: MutationOrigin::Modal,
            success: "File(s) shared successfully.".to_string(),
            failure: "Failed to share file(s).".to_string(),
        })]
    );
}

#[test]
fn public_share_modal_tracks_the_link_lifecycle() {
    let mut state = directory_state(vec![dir_item("/a.txt", false), dir_item("/b.txt", false)]);
    reduce(&mut state, FileManagerAction::SelectAll);
    reduce(&mut state, FileManagerAction::RunCommand(MenuCommand::SharePublic));

    let effects = reduce(&mut state, FileManagerAction::SubmitModal);
    assert_eq!(
        effects,
        vec![FileManagerEffect::CreatePublicShare {
            paths: vec!["/a.txt".to_string(), "/b.txt".to_string()],
            name: "2 Shared Items".to_string(),
            scope: FileScope::Home,
        }]
    );

    reduce(
        &mut state,
        FileManagerAction::PublicShareCreated {
            token: "tok123".to_string(),
        },
    );
    assert!(reduce(&mut state, FileManagerAction::SubmitModal).is_empty());

    let effects = reduce(&mut state, FileManagerAction::RevokePublicShare);
    assert_eq!(
        effects,
        vec![FileManagerEffect::DeletePublicShare {
            token: "tok123".to_string()
        }]
    );
    reduce(&mut state, FileManagerAction::PublicShareRevoked);
    assert!(matches!(
        state.modal.map(|open| open.modal),
        Some(Modal::SharePublic { token: None, .. })
    ));
}

#[test]
fn upload_batch_reports_one_outcome_and_one_refetch() {
    let mut state = FileManagerState::default();
    let effects = reduce(
        &mut state,
        FileManagerAction::UploadFiles {
            files: vec![upload_file("a"), upload_file("b"), upload_file("c")],
        },
    );
    let [FileManagerEffect::UploadBatch { toast_id, files, .. }] = effects.as_slice() else {
        panic!("expected one batch, got {effects:?}");
    };
    assert_eq!(files.len(), 3);
    assert_eq!(state.toasts.count(ToastLevel::Loading), 1);

    let effects = reduce(
        &mut state,
        FileManagerAction::UploadFinished {
            toast_id: *toast_id,
            total: 3,
            failed: 1,
        },
    );
    assert_eq!(state.toasts.len(), 1);
    assert_eq!(state.toasts.count(ToastLevel::Error), 1);
    assert_eq!(
        effects
            .iter()
            .filter(|effect| matches!(effect, FileManagerEffect::LoadListing { .. }))
            .count(),
        1
    );
}

#[test]
fn native_drop_outside_directory_view_uploads_nothing() {
    let mut state = FileManagerState {
        view: ViewMode::MyShares,
        location: "my-shares".to_string(),
        ..FileManagerState::default()
    };
    let effects = reduce(
        &mut state,
        FileManagerAction::FilesDropped {
            files: vec![upload_file("a")],
        },
    );
    assert!(effects.is_empty());
    assert!(state.toasts.is_empty());
}

#[test]
fn viewer_loads_content_and_releases_late_media() {
    let mut state = directory_state(vec![dir_item("/notes.txt", false)]);
    let effects = reduce(
        &mut state,
        FileManagerAction::ItemDoubleClicked {
            id: path_id("/notes.txt"),
        },
    );
    let source = ContentSource::Path {
        path: "/notes.txt".to_string(),
        scope: FileScope::Home,
    };
    assert_eq!(
        effects,
        vec![FileManagerEffect::LoadPreview {
            source: source.clone(),
            kind: PreviewKind::Text,
            file_name: "notes.txt".to_string(),
            size: 0,
        }]
    );

    reduce(
        &mut state,
        FileManagerAction::PreviewLoaded {
            source: source.clone(),
            content: PreviewState::Text("hello".to_string()),
        },
    );
    assert!(matches!(
        state.modal.as_ref().map(|open| &open.modal),
        Some(Modal::Viewer {
            content: PreviewState::Text(_),
            ..
        })
    ));

    reduce(&mut state, FileManagerAction::CloseModal);
    let effects = reduce(
        &mut state,
        FileManagerAction::PreviewLoaded {
            source,
            content: PreviewState::Media {
                url: "blob:late".to_string(),
            },
        },
    );
    assert_eq!(
        effects,
        vec![FileManagerEffect::ReleaseObjectUrl {
            url: "blob:late".to_string()
        }]
    );
}

#[test]
fn shared_folders_cannot_be_browsed() {
    let mut folder = shared_item(4, "docs/projects");
    if let FileItem::SharedWithMe(entry) = &mut folder {
        entry.kind = FileKind::Dir;
    }
    let mut state = FileManagerState {
        view: ViewMode::SharedWithMe,
        location: "shared-with-me".to_string(),
        items: vec![folder],
        ..FileManagerState::default()
    };
    let effects = reduce(
        &mut state,
        FileManagerAction::ItemDoubleClicked {
            id: ItemId::Share(4),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.location, "shared-with-me");
    assert_eq!(
        state.toasts.last().map(|t| t.message.as_str()),
        Some("Cannot browse subfolders directly in this view. Please download or view the item.")
    );
}

#[test]
fn system_root_needs_an_admin() {
    let mut state = FileManagerState::default();
    let mut interaction = InteractionState::default();
    let before = state.clone();
    assert_eq!(
        reduce_file_manager(
            &mut state,
            &mut interaction,
            FileManagerAction::SwitchScope {
                scope: FileScope::SystemRoot
            }
        ),
        Err(ReducerError::NotPermitted)
    );
    assert_eq!(state, before);

    state.user = Some(user(9, "root", "admin"));
    reduce(
        &mut state,
        FileManagerAction::SwitchScope {
            scope: FileScope::SystemRoot,
        },
    );
    assert_eq!(state.scope, FileScope::SystemRoot);
    assert_eq!(state.location, "/");
}
