//! Typed host-domain contracts and shared models used across the runtime and browser adapters.
//!
//! This crate is the API-first boundary for the file manager's remote collaborator. It exposes
//! the backend wire models, the [`FileGateway`], [`ClipboardService`] and [`BlobService`]
//! traits, the [`GatewayError`] taxonomy and in-memory adapters for tests, while concrete
//! browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod blob;
pub mod clipboard;
pub mod fs;
pub mod host;

pub use blob::{BlobService, MemoryBlobService, NoopBlobService};
pub use clipboard::{
    ClipboardFuture, ClipboardService, MemoryClipboardService, NoopClipboardService,
};
pub use fs::error::{GatewayError, CONNECTION_FAILED_MESSAGE};
pub use fs::memory::{GatewayCall, MemoryFileGateway};
pub use fs::path::{file_name, join_path, normalize_virtual_path, parent_path, path_segments};
pub use fs::service::{FileGateway, FileGatewayFuture, GatewayResult, NoopFileGateway};
pub use fs::types::{
    ContentSource, DirectoryEntry, FileContent, FileKind, FileScope, MyShareEntry,
    SharedWithMeEntry, TrashEntry, UploadFile, UserAccount, ZipEntry, MY_SHARES_VIEW_TOKEN,
    SHARED_WITH_ME_VIEW_TOKEN, TRASH_VIEW_TOKEN,
};
pub use host::{HostServices, HostStrategy};
