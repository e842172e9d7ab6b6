//! Binary payload hand-off between the runtime and the host page.

use std::{cell::RefCell, rc::Rc};

/// Host service that turns downloaded bytes into something the page can show or save.
pub trait BlobService {
    /// Offers `bytes` to the user as a download named `file_name`.
    fn save_as(&self, file_name: &str, bytes: &[u8]) -> Result<(), String>;

    /// Creates a temporary URL that media elements can load `bytes` from.
    fn object_url(&self, bytes: &[u8], mime: &str) -> Result<String, String>;

    /// Releases a URL returned by [`BlobService::object_url`].
    fn revoke_object_url(&self, url: &str);
}

#[derive(Debug, Clone, Copy, Default)]
/// Blob service for targets without a page.
pub struct NoopBlobService;

impl BlobService for NoopBlobService {
    fn save_as(&self, _file_name: &str, _bytes: &[u8]) -> Result<(), String> {
        Err("file saving unavailable".to_string())
    }

    fn object_url(&self, _bytes: &[u8], _mime: &str) -> Result<String, String> {
        Err("object urls unavailable".to_string())
    }

    fn revoke_object_url(&self, _url: &str) {}
}

#[derive(Debug, Default)]
struct MemoryBlobState {
    saved: Vec<(String, usize)>,
    live_urls: Vec<String>,
    next_url: u64,
}

#[derive(Debug, Clone, Default)]
/// Blob service that records saves and tracks live object URLs.
pub struct MemoryBlobService {
    inner: Rc<RefCell<MemoryBlobState>>,
}

impl MemoryBlobService {
    /// Returns `(file_name, byte_len)` for every save.
    pub fn saved(&self) -> Vec<(String, usize)> {
        self.inner.borrow().saved.clone()
    }

    /// Returns object URLs that were created and not yet revoked.
    pub fn live_urls(&self) -> Vec<String> {
        self.inner.borrow().live_urls.clone()
    }
}

impl BlobService for MemoryBlobService {
    fn save_as(&self, file_name: &str, bytes: &[u8]) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .saved
            .push((file_name.to_string(), bytes.len()));
        Ok(())
    }

    fn object_url(&self, _bytes: &[u8], _mime: &str) -> Result<String, String> {
        let mut inner = self.inner.borrow_mut();
        inner.next_url += 1;
        let url = format!("blob:memory/{}", inner.next_url);
        inner.live_urls.push(url.clone());
        Ok(url)
    }

    fn revoke_object_url(&self, url: &str) {
        self.inner.borrow_mut().live_urls.retain(|live| live != url);
    }
}
