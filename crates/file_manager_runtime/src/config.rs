//! Bundled runtime configuration for the file manager.
//!
//! `file_manager.toml` is validated by the build script and embedded as JSON. Keys missing from
//! the file fall back to [`FileManagerConfig::default`].

use std::sync::OnceLock;

use leptos::logging;
use serde::{Deserialize, Serialize};

use crate::toast::ToastLevel;

include!(concat!(env!("OUT_DIR"), "/file_manager_config_generated.rs"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Runtime knobs for backend addressing, toasts, drag previews and file previews.
pub struct FileManagerConfig {
    /// REST API root. Empty means "derive from the page host".
    pub api_base_url: String,
    /// Origin that serves public share links. Empty means "derive from the page host".
    pub share_base_url: String,
    /// Auto-dismiss delay for success toasts.
    pub toast_duration_ms: u32,
    /// Auto-dismiss delay for error toasts.
    pub error_toast_duration_ms: u32,
    /// Cursor offset, in pixels, of the synthetic drag image.
    pub drag_preview_offset: i32,
    /// Largest file the viewer fetches for a text or archive preview.
    pub max_preview_bytes: u64,
}

impl Default for FileManagerConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            share_base_url: String::new(),
            toast_duration_ms: 3000,
            error_toast_duration_ms: 5000,
            drag_preview_offset: 10,
            max_preview_bytes: 5 * 1024 * 1024,
        }
    }
}

impl FileManagerConfig {
    /// Returns the configuration embedded at build time.
    pub fn bundled() -> Self {
        static CONFIG: OnceLock<FileManagerConfig> = OnceLock::new();
        CONFIG
            .get_or_init(|| {
                Self::from_json(FILE_MANAGER_CONFIG_JSON).unwrap_or_else(|err| {
                    logging::warn!("bundled file manager config rejected: {err}");
                    Self::default()
                })
            })
            .clone()
    }

    /// Parses a configuration document, filling absent keys with defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Auto-dismiss delay for a toast, or `None` when it stays until replaced.
    pub fn toast_duration_ms(&self, level: ToastLevel) -> Option<u32> {
        match level {
            ToastLevel::Loading => None,
            ToastLevel::Success => Some(self.toast_duration_ms),
            ToastLevel::Error => Some(self.error_toast_duration_ms),
        }
    }

    /// Public link for a share token.
    pub fn public_share_url(&self, token: &str) -> String {
        format!("{}/shares/{token}", self.share_base_url.trim_end_matches('/'))
    }
}
