//! Listing table: one row per displayed item, with click, context-menu and drag wiring.

use file_manager_runtime::{
    drag::{self, DRAG_PAYLOAD_MIME, NATIVE_FILES_TYPE},
    listing::{
        detail_cell, detail_header, format_timestamp, size_label, timestamp_header, SortColumn,
        SortDirection,
    },
    use_file_manager_runtime, Clipboard, FileItem, FileManagerAction, FileManagerState,
};
use leptos::*;

use crate::dom::{self, stop_mouse_event};

/// Row key that changes whenever anything rendered in the row changes.
fn row_key(item: &FileItem) -> String {
    format!(
        "{}|{}|{}|{}",
        item.id().render_key(),
        item.name(),
        item.size(),
        item.timestamp()
    )
}

fn row_class(selected: bool, drop_target: bool, cut: bool) -> String {
    let mut class = String::from("fm-row");
    if selected {
        class.push_str(" selected");
    }
    if drop_target {
        class.push_str(" drop-target");
    }
    if cut {
        class.push_str(" cut");
    }
    class
}

fn is_cut(state: &FileManagerState, path: &str) -> bool {
    match &state.clipboard {
        Clipboard::Cut { paths, scope } => {
            *scope == state.scope && paths.iter().any(|cut| cut == path)
        }
        _ => false,
    }
}

#[component]
pub(crate) fn FileTable() -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let state = runtime.state;
    let view_mode = Signal::derive(move || state.with(|state| state.view));
    let items = Signal::derive(move || state.with(FileManagerState::display_items));
    let has_items = Signal::derive(move || state.with(|state| !state.items.is_empty()));

    view! {
        <Show
            when=move || has_items.get()
            fallback=move || {
                view! { <div class="fm-empty">{move || view_mode.get().empty_message()}</div> }
            }
        >
            <table class="fm-table" role="grid" aria-label="Files">
                <thead>
                    <tr>
                        <SortHeader column=SortColumn::Name label="Name" />
                        <SortHeader column=SortColumn::Size label="Size" />
                        {move || {
                            detail_header(view_mode.get()).map(|label| view! { <th>{label}</th> })
                        }}
                        <SortHeader
                            column=SortColumn::Modified
                            label=Signal::derive(move || timestamp_header(view_mode.get()))
                        />
                    </tr>
                </thead>
                <tbody>
                    <For each=move || items.get() key=row_key let:item>
                        <FileRow item=item />
                    </For>
                </tbody>
            </table>
        </Show>
    }
}

#[component]
fn SortHeader(column: SortColumn, #[prop(into)] label: MaybeSignal<&'static str>) -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let indicator = move || {
        runtime.state.with(|state| {
            if state.query.column != column {
                ""
            } else if state.query.direction == SortDirection::Asc {
                " \u{25b2}"
            } else {
                " \u{25bc}"
            }
        })
    };

    view! {
        <th
            class="fm-sortable"
            on:click=move |_| runtime.dispatch_action(FileManagerAction::SortBy { column })
        >
            {move || label.get()}
            {indicator}
        </th>
    }
}

#[component]
fn FileRow(item: FileItem) -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let state = runtime.state;
    let interaction = runtime.interaction;
    let id = item.id();
    let is_dir = item.is_dir();
    let drag_offset = runtime.config().drag_preview_offset;

    let class = {
        let id = id.clone();
        let path = item.path().to_string();
        move || {
            let (selected, cut) =
                state.with(|state| (state.selection.contains(&id), is_cut(state, &path)));
            let drop_target = interaction.with(|ui| ui.drop_target.as_ref() == Some(&id));
            row_class(selected, drop_target, cut)
        }
    };
    let draggable = move || {
        if state.with(|state| state.view.is_restricted()) {
            "false"
        } else {
            "true"
        }
    };

    let on_click = {
        let id = id.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            runtime.dispatch_action(FileManagerAction::ItemClicked {
                id: id.clone(),
                modifiers: dom::click_modifiers(&ev),
            });
        }
    };
    let on_double_click = {
        let id = id.clone();
        move |ev: web_sys::MouseEvent| {
            stop_mouse_event(&ev);
            runtime.dispatch_action(FileManagerAction::ItemDoubleClicked { id: id.clone() });
        }
    };
    let on_context_menu = {
        let id = id.clone();
        move |ev: web_sys::MouseEvent| {
            stop_mouse_event(&ev);
            runtime.dispatch_action(FileManagerAction::OpenItemMenu {
                id: id.clone(),
                position: dom::pointer_position(&ev),
            });
        }
    };
    let on_drag_start = {
        let id = id.clone();
        move |ev: web_sys::DragEvent| {
            let start = state.with_untracked(|state| drag::begin_drag(state, &id));
            let (Some(start), Some(transfer)) = (start, ev.data_transfer()) else {
                ev.prevent_default();
                return;
            };
            let payload = match start.payload.to_json() {
                Ok(payload) => payload,
                Err(err) => {
                    logging::warn!("file manager drag payload encode failed: {err}");
                    ev.prevent_default();
                    return;
                }
            };
            if transfer.set_data(DRAG_PAYLOAD_MIME, &payload).is_err() {
                ev.prevent_default();
                return;
            }
            transfer.set_effect_allowed("move");
            dom::attach_drag_preview(&transfer, &start.preview, drag_offset);
            runtime.dispatch_action(FileManagerAction::DragStarted { id: id.clone() });
        }
    };
    let on_drag_enter = {
        let id = id.clone();
        move |ev: web_sys::DragEvent| {
            if is_dir && dom::transfer_types(&ev).iter().any(|kind| kind == DRAG_PAYLOAD_MIME) {
                ev.prevent_default();
                runtime.dispatch_action(FileManagerAction::RowDragEnter { id: id.clone() });
            }
        }
    };
    let on_drag_over = move |ev: web_sys::DragEvent| {
        let restricted = state.with_untracked(|state| state.view.is_restricted());
        if is_dir
            && !restricted
            && dom::transfer_types(&ev).iter().any(|kind| kind == DRAG_PAYLOAD_MIME)
        {
            ev.prevent_default();
            if let Some(transfer) = ev.data_transfer() {
                transfer.set_drop_effect("move");
            }
        }
    };
    let on_drag_leave = {
        let id = id.clone();
        move |ev: web_sys::DragEvent| {
            runtime.dispatch_action(FileManagerAction::RowDragLeave {
                id: id.clone(),
                still_inside: dom::drag_still_inside(&ev),
            });
        }
    };
    let on_drop = {
        let id = id.clone();
        move |ev: web_sys::DragEvent| {
            let payload = ev
                .data_transfer()
                .and_then(|transfer| transfer.get_data(DRAG_PAYLOAD_MIME).ok())
                .filter(|raw| !raw.is_empty());
            // OS files dropped on a row belong to the listing background.
            if payload.is_none()
                && dom::transfer_types(&ev)
                    .iter()
                    .any(|kind| kind == NATIVE_FILES_TYPE)
            {
                return;
            }
            ev.prevent_default();
            ev.stop_propagation();
            runtime.dispatch_action(FileManagerAction::DroppedOnRow {
                target: id.clone(),
                payload,
            });
        }
    };

    let glyph = if is_dir { "[D]" } else { "[F]" };
    let size = size_label(&item);
    let detail = detail_cell(&item).map(str::to_string);
    let shows_detail = detail_header(item.view()).is_some();
    let timestamp = format_timestamp(item.timestamp());

    view! {
        <tr
            class=class
            draggable=draggable
            on:click=on_click
            on:dblclick=on_double_click
            on:contextmenu=on_context_menu
            on:dragstart=on_drag_start
            on:dragenter=on_drag_enter
            on:dragover=on_drag_over
            on:dragleave=on_drag_leave
            on:drop=on_drop
            on:dragend=move |_| runtime.dispatch_action(FileManagerAction::DragEnded)
        >
            <td class="fm-name">
                <span class="fm-glyph" aria-hidden="true">{glyph}</span>
                <span>{item.name().to_string()}</span>
            </td>
            <td class="fm-size">{size}</td>
            {shows_detail.then(|| view! { <td class="fm-detail">{detail.unwrap_or_default()}</td> })}
            <td class="fm-timestamp">{timestamp}</td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn row_class_lists_every_active_state() {
        assert_eq!(row_class(false, false, false), "fm-row");
        assert_eq!(row_class(true, false, true), "fm-row selected cut");
        assert_eq!(row_class(true, true, false), "fm-row selected drop-target");
    }
}
