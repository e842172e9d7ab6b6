//! System clipboard host-service contracts.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`ClipboardService`].
pub type ClipboardFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for writing text to the system clipboard.
pub trait ClipboardService {
    /// Replaces the clipboard contents with `text`.
    fn write_text<'a>(&'a self, text: &'a str) -> ClipboardFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Clipboard service for targets without clipboard access.
pub struct NoopClipboardService;

impl ClipboardService for NoopClipboardService {
    fn write_text<'a>(&'a self, _text: &'a str) -> ClipboardFuture<'a, Result<(), String>> {
        Box::pin(async { Err("clipboard unavailable".to_string()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Clipboard service that keeps the written texts in memory.
pub struct MemoryClipboardService {
    written: Rc<RefCell<Vec<String>>>,
}

impl MemoryClipboardService {
    /// Returns the most recent text written.
    pub fn last_text(&self) -> Option<String> {
        self.written.borrow().last().cloned()
    }
}

impl ClipboardService for MemoryClipboardService {
    fn write_text<'a>(&'a self, text: &'a str) -> ClipboardFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.written.borrow_mut().push(text.to_string());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_clipboard_keeps_latest_text() {
        let clipboard = MemoryClipboardService::default();
        let clipboard_obj: &dyn ClipboardService = &clipboard;

        block_on(clipboard_obj.write_text("/a")).expect("write");
        block_on(clipboard_obj.write_text("/a\n/b")).expect("write");
        assert_eq!(clipboard.last_text().as_deref(), Some("/a\n/b"));
    }

    #[test]
    fn noop_clipboard_reports_failure() {
        let clipboard = NoopClipboardService;
        assert!(block_on(clipboard.write_text("x")).is_err());
    }
}
