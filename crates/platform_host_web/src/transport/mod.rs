//! HTTP transport for the gateway adapter.
//!
//! Routes calls to the target-specific implementation while keeping one API for
//! [`crate::gateway`]. Every request sends credentials so the backend session cookie travels
//! with it.

use platform_host::{GatewayError, GatewayResult, UploadFile};
use serde::Deserialize;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

/// Form fields sent next to an uploaded file.
pub struct UploadFields<'a> {
    pub destination: &'a str,
    pub system_root_access: bool,
}

pub async fn get_text(url: &str) -> GatewayResult<String> {
    imp::get_text(url).await
}

pub async fn get_bytes(url: &str) -> GatewayResult<Vec<u8>> {
    imp::get_bytes(url).await
}

pub async fn post_json(url: &str, body: String) -> GatewayResult<String> {
    imp::post_json(url, body).await
}

pub async fn post_file(
    url: &str,
    file: &UploadFile,
    fields: UploadFields<'_>,
) -> GatewayResult<()> {
    imp::post_file(url, file, fields).await
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Builds the error for a non-success response from its status and raw body.
pub fn remote_error(status: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error.or(parsed.message))
        .filter(|message| !message.trim().is_empty());
    GatewayError::Remote { status, message }
}
