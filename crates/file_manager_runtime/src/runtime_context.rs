//! Runtime provider and context wiring for the file manager page.
//!
//! This module owns the long-lived reducer container and effect queue. UI composition lives in
//! the app crate, which reads state and dispatches through [`FileManagerRuntimeContext`].
#![allow(clippy::clone_on_copy)]

use leptos::*;
use platform_host::HostServices;

use crate::{
    config::FileManagerConfig,
    effect_executor,
    host::FileManagerHost,
    model::{FileManagerState, InteractionState},
    reducer::{reduce_file_manager, FileManagerAction, FileManagerEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading file manager state and dispatching [`FileManagerAction`] values.
pub struct FileManagerRuntimeContext {
    /// Host services and configuration for executing side effects.
    pub host: StoredValue<FileManagerHost>,
    /// Reactive page state signal.
    pub state: RwSignal<FileManagerState>,
    /// Reactive drag-highlight state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of effects emitted by the reducer and drained by the effect executor.
    pub effects: RwSignal<Vec<FileManagerEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<FileManagerAction>,
}

impl FileManagerRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: FileManagerAction) {
        self.dispatch.call(action);
    }

    /// Returns the runtime configuration.
    pub fn config(&self) -> FileManagerConfig {
        self.host.with_value(|host| host.config().clone())
    }
}

#[component]
/// Provides [`FileManagerRuntimeContext`] to descendant components and loads the first listing.
pub fn FileManagerProvider(
    /// Injected browser or detached host bundle assembled by the entry layer.
    host_services: HostServices,
    /// Resolved runtime configuration.
    config: FileManagerConfig,
    children: Children,
) -> impl IntoView {
    let host = store_value(FileManagerHost::new(host_services, config));
    let state = create_rw_signal(FileManagerState::default());
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<FileManagerEffect>::new());

    let dispatch = Callback::new(move |action: FileManagerAction| {
        let mut page = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_page = page.clone();
        let previous_ui = ui.clone();

        match reduce_file_manager(&mut page, &mut ui, action) {
            Ok(new_effects) => {
                if page != previous_page {
                    state.set(page);
                }
                if ui != previous_ui {
                    interaction.set(ui);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("file manager reducer error: {err}"),
        }
    });

    let runtime = FileManagerRuntimeContext {
        host,
        state,
        interaction,
        effects,
        dispatch,
    };

    provide_context(runtime.clone());

    effect_executor::install(runtime);
    runtime.dispatch_action(FileManagerAction::Boot);

    children().into_view()
}

/// Returns the current [`FileManagerRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`FileManagerProvider`].
pub fn use_file_manager_runtime() -> FileManagerRuntimeContext {
    use_context::<FileManagerRuntimeContext>().expect("FileManagerRuntimeContext not provided")
}
