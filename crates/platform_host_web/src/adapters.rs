use std::rc::Rc;

use platform_host::{HostServices, HostStrategy};

use crate::{HttpFileGateway, WebBlobService, WebClipboardService};

/// Port the backend listens on when no explicit URL is configured.
pub const DEFAULT_BACKEND_PORT: u16 = 5000;

/// Page location parts used to derive backend URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOrigin {
    /// Scheme including the colon, e.g. `https:`.
    pub protocol: String,
    /// Host name without port.
    pub hostname: String,
}

impl PageOrigin {
    /// Reads the current page location, or `http://localhost` off the browser.
    pub fn current() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(location) = web_sys::window().map(|window| window.location()) {
                return Self {
                    protocol: location.protocol().unwrap_or_else(|_| "http:".to_string()),
                    hostname: location
                        .hostname()
                        .unwrap_or_else(|_| "localhost".to_string()),
                };
            }
        }

        Self {
            protocol: "http:".to_string(),
            hostname: "localhost".to_string(),
        }
    }

    fn backend_origin(&self, protocol: &str) -> String {
        format!("{protocol}//{}:{DEFAULT_BACKEND_PORT}", self.hostname)
    }
}

/// Returns the API root: `configured` when set, else `http://<page-host>:5000/api`.
pub fn resolve_api_base_url(configured: &str, origin: &PageOrigin) -> String {
    let configured = configured.trim();
    if configured.is_empty() {
        format!("{}/api", origin.backend_origin("http:"))
    } else {
        configured.trim_end_matches('/').to_string()
    }
}

/// Returns the public-share root: `configured` when set, else the backend origin using the
/// page's own scheme.
pub fn resolve_share_base_url(configured: &str, origin: &PageOrigin) -> String {
    let configured = configured.trim();
    if configured.is_empty() {
        origin.backend_origin(&origin.protocol)
    } else {
        configured.trim_end_matches('/').to_string()
    }
}

/// Builds the browser host bundle for an API root.
pub fn build_host_services(api_base_url: &str) -> HostServices {
    HostServices {
        files: Rc::new(HttpFileGateway::new(api_base_url)),
        clipboard: Rc::new(WebClipboardService),
        blobs: Rc::new(WebBlobService),
        host_strategy: HostStrategy::Browser,
    }
}
