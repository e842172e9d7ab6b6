use file_manager_runtime::{
    context_menu::{open_menu_entries, MenuEntry},
    use_file_manager_runtime, FileManagerAction,
};
use leptos::{html, *};

use crate::dom::{self, stop_mouse_event};

/// The single open context menu, clamped into the viewport once it has been measured.
#[component]
pub(crate) fn ContextMenu() -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let state = runtime.state;
    let menu = create_memo(move |_| state.with(|state| state.menu));
    let entries = create_memo(move |_| state.with(open_menu_entries));
    let menu_ref = create_node_ref::<html::Div>();

    create_effect(move |_| {
        if menu.get().is_none() {
            return;
        }
        request_animation_frame(move || {
            let Some(node) = menu_ref.get_untracked() else {
                return;
            };
            let rect = node.get_bounding_client_rect();
            runtime.dispatch_action(FileManagerAction::MenuMeasured {
                size: (rect.width().ceil() as i32, rect.height().ceil() as i32),
                viewport: dom::viewport_size(),
            });
        });
    });

    let style = move || {
        menu.get()
            .map(|open| {
                format!(
                    "position:fixed;left:{}px;top:{}px;",
                    open.position.x, open.position.y
                )
            })
            .unwrap_or_default()
    };

    view! {
        <Show when=move || menu.get().is_some() fallback=|| ()>
            <div
                node_ref=menu_ref
                class="fm-context-menu"
                role="menu"
                style=style
                on:click=move |ev| ev.stop_propagation()
                on:contextmenu=move |ev| stop_mouse_event(&ev)
            >
                <For
                    each=move || entries.get()
                    key=|entry| entry.command
                    let:entry
                >
                    <MenuItem entry=entry />
                </For>
            </div>
        </Show>
    }
}

#[component]
fn MenuItem(entry: MenuEntry) -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let command = entry.command;
    let class = if entry.destructive {
        "fm-menu-item destructive"
    } else {
        "fm-menu-item"
    };

    view! {
        <button
            type="button"
            role="menuitem"
            class=class
            on:click:undelegated=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(FileManagerAction::RunCommand(command));
            }
        >
            {entry.label}
        </button>
    }
}
