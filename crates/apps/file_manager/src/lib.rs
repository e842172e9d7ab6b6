//! Dockora file manager page.
//!
//! Renders the listing, toolbar, menus, dialogs and toasts on top of
//! [`file_manager_runtime::FileManagerProvider`]. Every user gesture becomes one
//! [`FileManagerAction`]; the components themselves keep no page state.

mod dom;
mod menus;
mod modals;
mod table;
mod toasts;

use file_manager_runtime::{
    breadcrumbs::breadcrumbs, context_menu::MenuCommand, drag, use_file_manager_runtime,
    FileManagerAction, FileManagerRuntimeContext, ViewMode,
};
use leptos::{html, *};
use platform_host::{FileKind, FileScope};

use crate::{
    dom::stop_mouse_event, menus::ContextMenu, modals::ModalLayer, table::FileTable,
    toasts::ToastStack,
};

const VIEW_TABS: [(ViewMode, &str); 4] = [
    (ViewMode::Directory, "My Files"),
    (ViewMode::SharedWithMe, "Shared with me"),
    (ViewMode::MyShares, "My Shares"),
    (ViewMode::Trash, "Trash"),
];

fn status_text(total: usize, selected: usize) -> String {
    if selected == 0 {
        format!("{total} item(s)")
    } else {
        format!("{selected} of {total} selected")
    }
}

fn unshare_label(selected: usize) -> String {
    format!("Unshare Selected ({selected})")
}

/// Full file manager page. Must be mounted inside a `FileManagerProvider`.
#[component]
pub fn FileManagerApp() -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let state = runtime.state;

    install_global_listeners(runtime);

    let status = move || {
        state.with(|state| status_text(state.items.len(), state.selection.len()))
    };

    view! {
        <div class="fm-shell">
            <ViewTabs />
            <Toolbar />
            <Breadcrumbs />
            <Listing />
            <div class="fm-statusbar">
                <span>{status}</span>
                <Show when=move || state.with(|state| state.loading) fallback=|| ()>
                    <span class="fm-muted">"Loading..."</span>
                </Show>
            </div>
            <ContextMenu />
            <ModalLayer />
            <ToastStack />
        </div>
    }
}

fn install_global_listeners(runtime: FileManagerRuntimeContext) {
    let state = runtime.state;

    let keyboard_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() {
            return;
        }
        let (menu_open, confirming, modal_open) = state.with_untracked(|state| {
            (
                state.menu.is_some(),
                state.confirmation.is_some(),
                state.modal.is_some(),
            )
        });

        if ev.key() == "Escape" {
            let action = if menu_open {
                FileManagerAction::CloseMenus
            } else if confirming {
                FileManagerAction::CancelPending
            } else if modal_open {
                FileManagerAction::CloseModal
            } else {
                return;
            };
            ev.prevent_default();
            runtime.dispatch_action(action);
            return;
        }

        let select_all = (ev.ctrl_key() || ev.meta_key()) && ev.key().eq_ignore_ascii_case("a");
        if select_all && !modal_open && !confirming && !dom::typing_in_field(&ev) {
            ev.prevent_default();
            runtime.dispatch_action(FileManagerAction::SelectAll);
        }
    });
    on_cleanup(move || keyboard_listener.remove());

    let outside_click_listener = window_event_listener(ev::click, move |_| {
        if state.with_untracked(|state| state.menu.is_some()) {
            runtime.dispatch_action(FileManagerAction::DocumentClicked);
        }
    });
    on_cleanup(move || outside_click_listener.remove());
}

#[component]
fn ViewTabs() -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let state = runtime.state;

    view! {
        <nav class="fm-tabs" aria-label="Views">
            {VIEW_TABS
                .into_iter()
                .map(|(mode, label)| {
                    let is_active = move || state.with(|state| state.view == mode);
                    view! {
                        <button
                            type="button"
                            class=move || if is_active() { "fm-tab active" } else { "fm-tab" }
                            on:click=move |_| {
                                runtime.dispatch_action(FileManagerAction::Navigate {
                                    location: mode.token().unwrap_or("/").to_string(),
                                })
                            }
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[component]
fn Toolbar() -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let state = runtime.state;
    let upload_input = create_node_ref::<html::Input>();

    let view_mode = Signal::derive(move || state.with(|state| state.view));
    let is_directory = Signal::derive(move || view_mode.get() == ViewMode::Directory);
    let can_go_up = Signal::derive(move || state.with(|state| state.can_go_up()));
    let is_admin = Signal::derive(move || state.with(|state| state.is_admin()));
    let scope = Signal::derive(move || state.with(|state| state.scope));
    let selected_count = Signal::derive(move || state.with(|state| state.selection.len()));
    let has_selection = Signal::derive(move || selected_count.get() > 0);
    let search = move || state.with(|state| state.query.search.clone());

    let on_upload_change = move |_| {
        let Some(input) = upload_input.get_untracked() else {
            return;
        };
        if let Some(files) = input.files() {
            if files.length() > 0 {
                dom::upload_file_list(runtime, files, false);
            }
        }
        input.set_value("");
    };

    view! {
        <div class="fm-toolbar">
            <button
                type="button"
                title="Up"
                disabled=move || !can_go_up.get()
                on:click=move |_| runtime.dispatch_action(FileManagerAction::GoUp)
            >
                ".."
            </button>
            <button
                type="button"
                on:click=move |_| runtime.dispatch_action(FileManagerAction::Refresh)
            >
                "Refresh"
            </button>
            <Show when=move || is_directory.get() fallback=|| ()>
                <button
                    type="button"
                    on:click=move |_| {
                        runtime.dispatch_action(FileManagerAction::OpenCreate { kind: FileKind::Dir })
                    }
                >
                    "New Folder"
                </button>
                <button
                    type="button"
                    on:click=move |_| {
                        runtime.dispatch_action(FileManagerAction::OpenCreate { kind: FileKind::File })
                    }
                >
                    "New File"
                </button>
                <button
                    type="button"
                    on:click=move |_| {
                        if let Some(input) = upload_input.get_untracked() {
                            input.click();
                        }
                    }
                >
                    "Upload"
                </button>
                <button
                    type="button"
                    on:click=move |_| runtime.dispatch_action(FileManagerAction::RunCommand(MenuCommand::Paste))
                    disabled=move || state.with(|state| state.clipboard.is_empty())
                >
                    "Paste"
                </button>
            </Show>
            <input
                node_ref=upload_input
                type="file"
                multiple=true
                class="fm-hidden"
                on:change=on_upload_change
            />
            <Show when=move || view_mode.get() == ViewMode::Trash fallback=|| ()>
                <button
                    type="button"
                    disabled=move || !has_selection.get()
                    on:click=move |_| {
                        runtime.dispatch_action(FileManagerAction::RunCommand(MenuCommand::Restore))
                    }
                >
                    "Restore"
                </button>
                <button
                    type="button"
                    class="destructive"
                    disabled=move || !has_selection.get()
                    on:click=move |_| {
                        runtime.dispatch_action(FileManagerAction::RunCommand(
                            MenuCommand::DeletePermanently,
                        ))
                    }
                >
                    "Delete Permanently"
                </button>
                <button
                    type="button"
                    class="destructive"
                    disabled=move || state.with(|state| state.items.is_empty())
                    on:click=move |_| runtime.dispatch_action(FileManagerAction::RequestEmptyTrash)
                >
                    "Empty Trash"
                </button>
            </Show>
            <Show when=move || view_mode.get() == ViewMode::MyShares fallback=|| ()>
                <button
                    type="button"
                    class="destructive"
                    disabled=move || !has_selection.get()
                    on:click=move |_| {
                        runtime.dispatch_action(FileManagerAction::RunCommand(MenuCommand::Unshare))
                    }
                >
                    {move || unshare_label(selected_count.get())}
                </button>
            </Show>
            <Show when=move || is_admin.get() && is_directory.get() fallback=|| ()>
                <label class="fm-scope-toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || scope.get() == FileScope::SystemRoot
                        on:change=move |ev| {
                            let scope = if event_target_checked(&ev) {
                                FileScope::SystemRoot
                            } else {
                                FileScope::Home
                            };
                            runtime.dispatch_action(FileManagerAction::SwitchScope { scope });
                        }
                    />
                    <span>"System root"</span>
                </label>
            </Show>
            <input
                type="search"
                class="fm-input fm-search"
                placeholder="Search this folder"
                prop:value=search
                on:input=move |ev| {
                    runtime.dispatch_action(FileManagerAction::SetSearch {
                        text: event_target_value(&ev),
                    })
                }
            />
        </div>
    }
}

#[component]
fn Breadcrumbs() -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let state = runtime.state;
    let trail = create_memo(move |_| state.with(|state| breadcrumbs(&state.location, state.view)));

    view! {
        <nav class="fm-breadcrumbs" aria-label="Location">
            {move || {
                trail
                    .get()
                    .into_iter()
                    .map(|crumb| match crumb.target {
                        Some(location) => view! {
                            <button
                                type="button"
                                class="fm-crumb"
                                on:click=move |_| {
                                    runtime.dispatch_action(FileManagerAction::Navigate {
                                        location: location.clone(),
                                    })
                                }
                            >
                                {crumb.label}
                            </button>
                        }
                        .into_view(),
                        None => view! { <span class="fm-crumb">{crumb.label}</span> }.into_view(),
                    })
                    .collect_view()
            }}
        </nav>
    }
}

/// Listing background: empty-space menu, background clicks and OS file drops.
#[component]
fn Listing() -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let state = runtime.state;
    let dragging_files = Signal::derive(move || runtime.interaction.with(|ui| ui.dragging_files));
    let load_error = move || state.with(|state| state.load_error.clone());

    let on_drag_over = move |ev: web_sys::DragEvent| {
        let types = dom::transfer_types(&ev);
        let view_mode = state.with_untracked(|state| state.view);
        if drag::accepts_native_files(view_mode, &types) {
            ev.prevent_default();
        }
        runtime.dispatch_action(FileManagerAction::PageDragOver { types });
    };
    let on_drag_leave = move |ev: web_sys::DragEvent| {
        if !dom::drag_still_inside(&ev) {
            runtime.dispatch_action(FileManagerAction::PageDragLeft);
        }
    };
    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        let types = dom::transfer_types(&ev);
        let view_mode = state.with_untracked(|state| state.view);
        let files = ev
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .filter(|files| files.length() > 0);
        match files {
            Some(files) if drag::accepts_native_files(view_mode, &types) => {
                dom::upload_file_list(runtime, files, true);
            }
            _ => runtime.dispatch_action(FileManagerAction::PageDragLeft),
        }
    };

    view! {
        <section
            class=move || if dragging_files.get() { "fm-listing dragging-files" } else { "fm-listing" }
            on:click=move |ev| {
                if dom::outside_rows(&ev) {
                    runtime.dispatch_action(FileManagerAction::BackgroundClicked);
                }
            }
            on:contextmenu=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(FileManagerAction::OpenEmptySpaceMenu {
                    position: dom::pointer_position(&ev),
                    target_is_background: dom::outside_rows(&ev),
                });
            }
            on:dragover=on_drag_over
            on:dragleave=on_drag_leave
            on:drop=on_drop
        >
            {move || {
                load_error()
                    .map(|message| view! { <p class="fm-load-error">{message}</p> })
            }}
            <FileTable />
            <Show when=move || dragging_files.get() fallback=|| ()>
                <div class="fm-drop-overlay">"Drop files to upload"</div>
            </Show>
        </section>
    }
}
