//! Reducer-driven state, interaction controllers and host wiring for the Dockora file manager.
//!
//! The page state lives in [`FileManagerState`] and changes only through
//! [`reduce_file_manager`]. Selection, drag-and-drop and context-menu rules are plain functions
//! over that state, so they are tested natively; [`FileManagerProvider`] wires them into Leptos
//! signals and runs the resulting effects against the injected host services.

pub mod breadcrumbs;
pub mod config;
pub mod context_menu;
pub mod drag;
mod effect_executor;
pub mod host;
pub mod listing;
pub mod model;
pub mod preview;
pub mod reducer;
pub mod runtime_context;
pub mod selection;
pub mod toast;
pub mod view_mode;

pub use config::FileManagerConfig;
pub use host::FileManagerHost;
pub use model::*;
pub use reducer::{
    reduce_file_manager, FileManagerAction, FileManagerEffect, ReducerError, ValidationError,
};
pub use runtime_context::{
    use_file_manager_runtime, FileManagerProvider, FileManagerRuntimeContext,
};
pub use view_mode::{ViewFlags, ViewMode};
