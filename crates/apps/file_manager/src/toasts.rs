use file_manager_runtime::{
    toast::Toast, use_file_manager_runtime, FileManagerAction, ToastLevel,
};
use gloo_timers::future::TimeoutFuture;
use leptos::*;

fn toast_class(level: ToastLevel) -> &'static str {
    match level {
        ToastLevel::Loading => "fm-toast fm-toast-loading",
        ToastLevel::Success => "fm-toast fm-toast-success",
        ToastLevel::Error => "fm-toast fm-toast-error",
    }
}

#[component]
pub(crate) fn ToastStack() -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let toasts = Signal::derive(move || {
        runtime
            .state
            .with(|state| state.toasts.iter().cloned().collect::<Vec<_>>())
    });

    view! {
        <div class="fm-toasts" role="status" aria-live="polite">
            // Keyed on the level too, so a replaced loading toast remounts and starts its timer.
            <For each=move || toasts.get() key=|toast| (toast.id, toast.level) let:toast>
                <ToastCard toast=toast />
            </For>
        </div>
    }
}

#[component]
fn ToastCard(toast: Toast) -> impl IntoView {
    let runtime = use_file_manager_runtime();
    let id = toast.id;

    if let Some(delay) = runtime.config().toast_duration_ms(toast.level) {
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            runtime.dispatch_action(FileManagerAction::DismissToast { id });
        });
    }

    view! {
        <div class=toast_class(toast.level)>
            <span class="fm-toast-message">{toast.message}</span>
            <button
                type="button"
                class="fm-toast-close"
                aria-label="Dismiss"
                on:click=move |_| runtime.dispatch_action(FileManagerAction::DismissToast { id })
            >
                "x"
            </button>
        </div>
    }
}
