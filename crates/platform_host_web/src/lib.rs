//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer: the REST file gateway, clipboard
//! and blob adapters, and upload file reading. HTTP calls go through `transport`, which routes
//! to `reqwasm` on `wasm32` and to an unsupported stub elsewhere so the crate still builds and
//! tests natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Host-bundle factory and backend URL resolution.
pub mod adapters;
pub mod blob;
pub mod clipboard;
pub mod gateway;
mod transport;
pub mod upload;

pub use adapters::{
    build_host_services, resolve_api_base_url, resolve_share_base_url, PageOrigin,
    DEFAULT_BACKEND_PORT,
};
pub use blob::WebBlobService;
pub use clipboard::WebClipboardService;
pub use gateway::HttpFileGateway;
pub use upload::read_file_list;
