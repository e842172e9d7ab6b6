//! Explicit effect-queue executor for reducer-emitted side effects.

use leptos::*;

use crate::runtime_context::FileManagerRuntimeContext;

/// Installs the effect executor that drains reducer-emitted effects in order.
///
/// Each effect runs on the local executor; its completion actions are dispatched back into the
/// reducer when it settles.
pub fn install(runtime: FileManagerRuntimeContext) {
    // Clear the queue before processing so nested dispatches enqueue a fresh batch instead of
    // being overwritten by the in-flight drain.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            let host = runtime.host.get_value();
            spawn_local(async move {
                for action in host.run_effect(effect).await {
                    runtime.dispatch_action(action);
                }
            });
        }
    });
}
