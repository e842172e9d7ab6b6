//! Dialogs for the open modal and the pending destructive confirmation.
//!
//! Each dialog is mounted once per modal kind and reads its fields reactively, so typing into a
//! field does not rebuild the input.

use file_manager_runtime::{
    listing::format_size,
    preview::{PreviewKind, PreviewState},
    use_file_manager_runtime, FileManagerAction, FileManagerRuntimeContext, FileManagerState,
    Modal,
};
use leptos::*;
use platform_host::FileKind;

use crate::dom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialog {
    Create,
    Rename,
    Move,
    SharePublic,
    ShareWithUsers,
    Viewer,
}

impl Dialog {
    fn of(modal: &Modal) -> Self {
        match modal {
            Modal::Create { .. } => Self::Create,
            Modal::Rename { .. } => Self::Rename,
            Modal::Move { .. } => Self::Move,
            Modal::SharePublic { .. } => Self::SharePublic,
            Modal::ShareWithUsers { .. } => Self::ShareWithUsers,
            Modal::Viewer { .. } => Self::Viewer,
        }
    }
}

fn open_modal<T>(state: &FileManagerState, read: impl FnOnce(&Modal) -> Option<T>) -> Option<T> {
    state.modal.as_ref().and_then(|open| read(&open.modal))
}

fn modal_title(modal: &Modal) -> String {
    match modal {
        Modal::Create {
            kind: FileKind::Dir,
            ..
        } => "Create New Folder".to_string(),
        Modal::Create { .. } => "Create New File".to_string(),
        Modal::Rename { original_name, .. } => format!("Rename '{original_name}'"),
        Modal::Move { paths, .. } => format!("Move {} item(s)", paths.len()),
        Modal::SharePublic { .. } => "Create Public Link".to_string(),
        Modal::ShareWithUsers { .. } => "Share with Users".to_string(),
        Modal::Viewer { item, .. } => item.name().to_string(),
    }
}

#[component]
pub(crate) fn ModalLayer() -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let state = runtime.state;
    let dialog = create_memo(move |_| {
        state.with(|state| state.modal.as_ref().map(|open| Dialog::of(&open.modal)))
    });
    let confirmation = create_memo(move |_| {
        state.with(|state| {
            state
                .confirmation
                .as_ref()
                .map(|pending| pending.message.clone())
        })
    });

    view! {
        {move || {
            dialog.get().map(|dialog| {
                let body = match dialog {
                    Dialog::Create | Dialog::Rename => view! { <NameForm /> }.into_view(),
                    Dialog::Move => view! { <MoveForm /> }.into_view(),
                    Dialog::SharePublic => view! { <PublicShareForm /> }.into_view(),
                    Dialog::ShareWithUsers => view! { <UserShareForm /> }.into_view(),
                    Dialog::Viewer => view! { <Viewer /> }.into_view(),
                };
                let wide = dialog == Dialog::Viewer;
                view! { <ModalFrame wide=wide>{body}</ModalFrame> }
            })
        }}
        {move || confirmation.get().map(|message| view! { <ConfirmDialog message=message /> })}
    }
}

#[component]
fn ModalFrame(wide: bool, children: Children) -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let state = runtime.state;
    let title = move || open_title(&state);
    let error = move || {
        state.with(|state| {
            state
                .modal
                .as_ref()
                .and_then(|open| open.error.clone())
        })
    };

    view! {
        <div
            class="fm-modal-backdrop"
            on:click=move |ev| {
                if dom::is_own_target(&ev) {
                    runtime.dispatch_action(FileManagerAction::CloseModal);
                }
            }
        >
            <div
                class=if wide { "fm-modal wide" } else { "fm-modal" }
                role="dialog"
                aria-modal="true"
            >
                <header class="fm-modal-header">
                    <h2>{title}</h2>
                    <button
                        type="button"
                        class="fm-modal-close"
                        aria-label="Close"
                        on:click=move |_| runtime.dispatch_action(FileManagerAction::CloseModal)
                    >
                        "x"
                    </button>
                </header>
                {move || error().map(|message| view! { <p class="fm-modal-error">{message}</p> })}
                {children()}
            </div>
        </div>
    }
}

fn open_title(state: &RwSignal<FileManagerState>) -> String {
    state.with(|state| open_modal(state, |modal| Some(modal_title(modal))).unwrap_or_default())
}

fn busy_signal(runtime: FileManagerRuntimeContext) -> Signal<bool> {
    Signal::derive(move || {
        runtime
            .state
            .with(|state| state.modal.as_ref().is_some_and(|open| open.busy))
    })
}

fn submit(runtime: FileManagerRuntimeContext) -> impl Fn(ev::SubmitEvent) + Copy {
    move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        runtime.dispatch_action(FileManagerAction::SubmitModal);
    }
}

#[component]
fn NameForm() -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let state = runtime.state;
    let busy = busy_signal(runtime);
    let name = move || {
        state.with(|state| {
            open_modal(state, |modal| match modal {
                Modal::Create { name, .. } | Modal::Rename { name, .. } => Some(name.clone()),
                _ => None,
            })
            .unwrap_or_default()
        })
    };
    let unchanged = move || {
        state.with(|state| {
            open_modal(state, |modal| match modal {
                Modal::Rename {
                    original_name,
                    name,
                    ..
                } => Some(name.trim() == original_name),
                _ => None,
            })
            .unwrap_or(false)
        })
    };
    let action_label = move || {
        state.with(|state| {
            open_modal(state, |modal| match modal {
                Modal::Rename { .. } => Some("Rename"),
                _ => Some("Create"),
            })
            .unwrap_or("Create")
        })
    };

    view! {
        <form class="fm-modal-body" on:submit=submit(runtime)>
            <input
                type="text"
                class="fm-input"
                placeholder="Name"
                autofocus=true
                prop:value=name
                on:input=move |ev| {
                    runtime.dispatch_action(FileManagerAction::EditModalName {
                        value: event_target_value(&ev),
                    })
                }
            />
            <footer class="fm-modal-actions">
                <button
                    type="button"
                    on:click=move |_| runtime.dispatch_action(FileManagerAction::CloseModal)
                >
                    "Cancel"
                </button>
                <button type="submit" class="primary" disabled=move || busy.get() || unchanged()>
                    {action_label}
                </button>
            </footer>
        </form>
    }
}

#[component]
fn MoveForm() -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let state = runtime.state;
    let busy = busy_signal(runtime);
    let destination = move || {
        state.with(|state| {
            open_modal(state, |modal| match modal {
                Modal::Move { destination, .. } => Some(destination.clone()),
                _ => None,
            })
            .unwrap_or_default()
        })
    };

    view! {
        <form class="fm-modal-body" on:submit=submit(runtime)>
            <label class="fm-field">
                <span>"Destination folder"</span>
                <input
                    type="text"
                    class="fm-input"
                    placeholder="/path/to/folder"
                    prop:value=destination
                    on:input=move |ev| {
                        runtime.dispatch_action(FileManagerAction::EditMoveDestination {
                            value: event_target_value(&ev),
                        })
                    }
                />
            </label>
            <footer class="fm-modal-actions">
                <button
                    type="button"
                    on:click=move |_| runtime.dispatch_action(FileManagerAction::CloseModal)
                >
                    "Cancel"
                </button>
                <button type="submit" class="primary" disabled=move || busy.get()>
                    "Move"
                </button>
            </footer>
        </form>
    }
}

#[component]
fn PublicShareForm() -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let state = runtime.state;
    let config = runtime.config();
    let busy = busy_signal(runtime);
    let name = move || {
        state.with(|state| {
            open_modal(state, |modal| match modal {
                Modal::SharePublic { name, .. } => Some(name.clone()),
                _ => None,
            })
            .unwrap_or_default()
        })
    };
    let link = create_memo(move |_| {
        state.with(|state| {
            open_modal(state, |modal| match modal {
                Modal::SharePublic { token, .. } => token.clone(),
                _ => None,
            })
        })
        .map(|token| config.public_share_url(&token))
    });

    view! {
        <form class="fm-modal-body" on:submit=submit(runtime)>
            <label class="fm-field">
                <span>"Share name"</span>
                <input
                    type="text"
                    class="fm-input"
                    prop:value=name
                    disabled=move || link.get().is_some()
                    on:input=move |ev| {
                        runtime.dispatch_action(FileManagerAction::EditModalName {
                            value: event_target_value(&ev),
                        })
                    }
                />
            </label>
            {move || {
                link.get()
                    .map(|url| {
                        let copied = url.clone();
                        view! {
                            <div class="fm-share-link">
                                <input type="text" class="fm-input" readonly=true prop:value=url />
                                <button
                                    type="button"
                                    on:click=move |_| {
                                        runtime.dispatch_action(FileManagerAction::CopyPublicLink {
                                            url: copied.clone(),
                                        })
                                    }
                                >
                                    "Copy Link"
                                </button>
                            </div>
                        }
                    })
            }}
            <footer class="fm-modal-actions">
                <button
                    type="button"
                    on:click=move |_| runtime.dispatch_action(FileManagerAction::CloseModal)
                >
                    "Close"
                </button>
                <Show
                    when=move || link.get().is_some()
                    fallback=move || {
                        view! {
                            <button type="submit" class="primary" disabled=move || busy.get()>
                                "Create Link"
                            </button>
                        }
                    }
                >
                    <button
                        type="button"
                        class="destructive"
                        disabled=move || busy.get()
                        on:click=move |_| {
                            runtime.dispatch_action(FileManagerAction::RevokePublicShare)
                        }
                    >
                        "Delete Link"
                    </button>
                </Show>
            </footer>
        </form>
    }
}

#[component]
fn UserShareForm() -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let state = runtime.state;
    let busy = busy_signal(runtime);
    let loading = create_memo(move |_| {
        state.with(|state| {
            open_modal(state, |modal| match modal {
                Modal::ShareWithUsers { loading, .. } => Some(*loading),
                _ => None,
            })
            .unwrap_or(false)
        })
    });
    let users = create_memo(move |_| {
        state.with(|state| {
            open_modal(state, |modal| match modal {
                Modal::ShareWithUsers { users, .. } => Some(users.clone()),
                _ => None,
            })
            .unwrap_or_default()
        })
    });
    let is_chosen = move |user_id: u64| {
        state.with(|state| {
            open_modal(state, |modal| match modal {
                Modal::ShareWithUsers { chosen, .. } => Some(chosen.contains(&user_id)),
                _ => None,
            })
            .unwrap_or(false)
        })
    };

    view! {
        <form class="fm-modal-body" on:submit=submit(runtime)>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="fm-muted">"Loading users..."</p> }
            >
                <Show
                    when=move || !users.with(Vec::is_empty)
                    fallback=|| view! { <p class="fm-muted">"No other users available."</p> }
                >
                    <div class="fm-recipient-actions">
                        <button
                            type="button"
                            on:click=move |_| {
                                runtime.dispatch_action(FileManagerAction::SelectAllRecipients)
                            }
                        >
                            "Select All"
                        </button>
                        <button
                            type="button"
                            on:click=move |_| {
                                runtime.dispatch_action(FileManagerAction::ClearRecipients)
                            }
                        >
                            "Clear"
                        </button>
                    </div>
                    <ul class="fm-recipients">
                        <For each=move || users.get() key=|user| user.id let:user>
                            {
                                let user_id = user.id;
                                view! {
                                    <li>
                                        <label>
                                            <input
                                                type="checkbox"
                                                prop:checked=move || is_chosen(user_id)
                                                on:change=move |_| {
                                                    runtime.dispatch_action(
                                                        FileManagerAction::ToggleRecipient { user_id },
                                                    )
                                                }
                                            />
                                            <span>{user.username}</span>
                                        </label>
                                    </li>
                                }
                            }
                        </For>
                    </ul>
                </Show>
            </Show>
            <footer class="fm-modal-actions">
                <button
                    type="button"
                    on:click=move |_| runtime.dispatch_action(FileManagerAction::CloseModal)
                >
                    "Cancel"
                </button>
                <button
                    type="submit"
                    class="primary"
                    disabled=move || busy.get() || loading.get()
                >
                    "Share"
                </button>
            </footer>
        </form>
    }
}

#[component]
fn Viewer() -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let state = runtime.state;
    let viewed = create_memo(move |_| {
        state.with(|state| {
            open_modal(state, |modal| match modal {
                Modal::Viewer {
                    source,
                    kind,
                    content,
                    ..
                } => Some((source.clone(), *kind, content.clone())),
                _ => None,
            })
        })
    });

    let body = move || {
        let (source, kind, content) = viewed.get()?;
        let download = if content.offers_download() {
            runtime.host.with_value(|host| host.download_url(&source))
        } else {
            None
        };
        let notice = content.notice();
        let rendered = match content {
            PreviewState::Loading => view! { <p class="fm-muted">"Loading preview..."</p> }.into_view(),
            PreviewState::Text(text) => view! { <pre class="fm-text-preview">{text}</pre> }.into_view(),
            PreviewState::Zip(entries) => view! {
                <ul class="fm-zip-listing">
                    {entries
                        .into_iter()
                        .map(|entry| {
                            let size = if entry.is_dir { String::new() } else { format_size(entry.size) };
                            view! {
                                <li>
                                    <span>{entry.name}</span>
                                    <span class="fm-muted">{size}</span>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            }
            .into_view(),
            PreviewState::Media { url } => media_view(kind, url),
            PreviewState::Failed(message) => {
                view! { <p class="fm-modal-error">{message}</p> }.into_view()
            }
            PreviewState::TooLarge | PreviewState::Unsupported => ().into_view(),
        };
        Some(view! {
            <div class="fm-viewer">
                {rendered}
                {notice.map(|notice| view! { <p class="fm-muted">{notice}</p> })}
                {download.map(|href| view! {
                    <a class="fm-download" href=href download="">"Download"</a>
                })}
            </div>
        })
    };

    view! { <div class="fm-modal-body">{body}</div> }
}

fn media_view(kind: PreviewKind, url: String) -> View {
    match kind {
        PreviewKind::Image => view! { <img class="fm-media" src=url alt="" /> }.into_view(),
        PreviewKind::Video => view! { <video class="fm-media" src=url controls=true></video> }.into_view(),
        PreviewKind::Audio => view! { <audio src=url controls=true></audio> }.into_view(),
        _ => view! { <iframe class="fm-media fm-document" src=url title="Preview"></iframe> }.into_view(),
    }
}

#[component]
fn ConfirmDialog(message: String) -> impl IntoView {
    let runtime = use_file_manager_runtime();

    view! {
        <div class="fm-modal-backdrop">
            <div class="fm-modal fm-confirm" role="alertdialog" aria-modal="true">
                <p>{message}</p>
                <footer class="fm-modal-actions">
                    <button
                        type="button"
                        on:click=move |_| runtime.dispatch_action(FileManagerAction::CancelPending)
                    >
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class="destructive"
                        on:click=move |_| runtime.dispatch_action(FileManagerAction::ConfirmPending)
                    >
                        "Confirm"
                    </button>
                </footer>
            </div>
        </div>
    }
}
