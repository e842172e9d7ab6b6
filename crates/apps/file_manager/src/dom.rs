//! Small DOM readers and writers shared by the page components.

use file_manager_runtime::{
    context_menu::MenuPosition, drag::DragPreview, selection::ClickModifiers,
    FileManagerAction, FileManagerRuntimeContext, ToastLevel,
};
use gloo_timers::callback::Timeout;
use leptos::*;
use wasm_bindgen::JsCast;

pub(crate) const ROW_SELECTOR: &str = ".fm-row";

pub(crate) fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

pub(crate) fn click_modifiers(ev: &web_sys::MouseEvent) -> ClickModifiers {
    ClickModifiers {
        shift: ev.shift_key(),
        ctrl: ev.ctrl_key() || ev.meta_key(),
    }
}

pub(crate) fn pointer_position(ev: &web_sys::MouseEvent) -> MenuPosition {
    MenuPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

pub(crate) fn viewport_size() -> (i32, i32) {
    let Some(window) = web_sys::window() else {
        return (0, 0);
    };
    let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value
            .ok()
            .and_then(|value| value.as_f64())
            .map_or(0, |value| value as i32)
    };
    (read(window.inner_width()), read(window.inner_height()))
}

/// Data-transfer types advertised by a drag.
pub(crate) fn transfer_types(ev: &web_sys::DragEvent) -> Vec<String> {
    ev.data_transfer()
        .map(|transfer| {
            transfer
                .types()
                .iter()
                .filter_map(|kind| kind.as_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Whether a `dragleave` moved onto a descendant of the element that fired it.
pub(crate) fn drag_still_inside(ev: &web_sys::DragEvent) -> bool {
    let current = ev
        .current_target()
        .and_then(|target| target.dyn_into::<web_sys::Node>().ok());
    let related = ev
        .related_target()
        .and_then(|target| target.dyn_into::<web_sys::Node>().ok());
    match (current, related) {
        (Some(current), Some(related)) => current.contains(Some(&related)),
        _ => false,
    }
}

/// Whether the event fired on the element that owns the listener rather than a descendant.
pub(crate) fn is_own_target(ev: &web_sys::Event) -> bool {
    match (ev.target(), ev.current_target()) {
        (Some(target), Some(current)) => target == current,
        _ => false,
    }
}

/// Whether the event started outside every item row.
pub(crate) fn outside_rows(ev: &web_sys::Event) -> bool {
    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .map_or(true, |element| {
            matches!(element.closest(ROW_SELECTOR), Ok(None))
        })
}

/// Whether a key event is headed for a text field, where page shortcuts must not apply.
pub(crate) fn typing_in_field(ev: &web_sys::KeyboardEvent) -> bool {
    let Some(element) = ev
        .target()
        .and_then(|target| target.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return false;
    };
    matches!(
        element.tag_name().to_ascii_uppercase().as_str(),
        "INPUT" | "TEXTAREA" | "SELECT"
    ) || element.is_content_editable()
}

/// Builds an off-screen drag image for `preview` and removes it once the browser captured it.
pub(crate) fn attach_drag_preview(
    transfer: &web_sys::DataTransfer,
    preview: &DragPreview,
    offset: i32,
) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let (Some(body), Ok(node)) = (document.body(), document.create_element("div")) else {
        return;
    };
    node.set_class_name("fm-drag-preview");
    let _ = node.set_attribute("style", "position:absolute;top:-1000px;left:-1000px;");
    let glyph = if preview.is_dir { "[D]" } else { "[F]" };
    node.set_text_content(Some(&format!("{glyph} {}", preview.label)));
    if body.append_child(&node).is_err() {
        return;
    }
    transfer.set_drag_image(&node, offset, offset);
    Timeout::new(0, move || node.remove()).forget();
}

/// Reads `files` and dispatches them as one upload batch.
///
/// Unreadable files are left out of the batch and reported in a single error toast.
#[cfg(target_arch = "wasm32")]
pub(crate) fn upload_file_list(
    runtime: FileManagerRuntimeContext,
    files: web_sys::FileList,
    dropped: bool,
) {
    spawn_local(async move {
        let (files, unreadable) = platform_host_web::read_file_list(&files).await;
        if !unreadable.is_empty() {
            for failure in &unreadable {
                logging::warn!("upload skipped unreadable file {failure}");
            }
            runtime.dispatch_action(FileManagerAction::Notify {
                level: ToastLevel::Error,
                message: format!("Could not read {} file(s).", unreadable.len()),
            });
        }
        let action = if dropped {
            FileManagerAction::FilesDropped { files }
        } else {
            FileManagerAction::UploadFiles { files }
        };
        runtime.dispatch_action(action);
    });
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn upload_file_list(
    runtime: FileManagerRuntimeContext,
    _files: web_sys::FileList,
    _dropped: bool,
) {
    runtime.dispatch_action(FileManagerAction::Notify {
        level: ToastLevel::Error,
        message: "Uploads need a browser.".to_string(),
    });
}
