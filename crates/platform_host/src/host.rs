//! Host-bundle model injected into the file manager runtime.

use std::rc::Rc;

use crate::{
    BlobService, ClipboardService, FileGateway, NoopBlobService, NoopClipboardService,
    NoopFileGateway,
};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser composition talking to the REST backend.
    Browser,
    /// In-memory or no-op composition for native builds and tests.
    Detached,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Detached => "detached",
        }
    }
}

/// Runtime-selected host service bundle.
///
/// All environment-specific adapter selection happens before this bundle crosses into
/// `file_manager_runtime`, which keeps the runtime and app crates free of browser details.
#[derive(Clone)]
pub struct HostServices {
    /// Backend file, trash and share endpoints.
    pub files: Rc<dyn FileGateway>,
    /// System clipboard.
    pub clipboard: Rc<dyn ClipboardService>,
    /// Download and media URL hand-off.
    pub blobs: Rc<dyn BlobService>,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds a detached bundle from explicit adapters.
    pub fn detached(
        files: Rc<dyn FileGateway>,
        clipboard: Rc<dyn ClipboardService>,
        blobs: Rc<dyn BlobService>,
    ) -> Self {
        Self {
            files,
            clipboard,
            blobs,
            host_strategy: HostStrategy::Detached,
        }
    }

    /// Builds a bundle whose services do nothing.
    pub fn noop() -> Self {
        Self::detached(
            Rc::new(NoopFileGateway),
            Rc::new(NoopClipboardService),
            Rc::new(NoopBlobService),
        )
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("host_strategy", &self.host_strategy)
            .finish_non_exhaustive()
    }
}
