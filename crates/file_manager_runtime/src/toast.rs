//! Transient notification queue.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    /// Pending work; stays until replaced by its outcome.
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Ordered toast stack with monotonically increasing ids.
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            level,
            message: message.into(),
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastLevel::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastLevel::Error, message)
    }

    /// Replaces a toast in place, or appends a new one if `id` was already dismissed.
    pub fn replace(&mut self, id: u64, level: ToastLevel, message: impl Into<String>) -> u64 {
        let message = message.into();
        match self.toasts.iter_mut().find(|toast| toast.id == id) {
            Some(toast) => {
                toast.level = level;
                toast.message = message;
                id
            }
            None => self.push(level, message),
        }
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    pub fn get(&self, id: u64) -> Option<&Toast> {
        self.toasts.iter().find(|toast| toast.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn count(&self, level: ToastLevel) -> usize {
        self.toasts.iter().filter(|toast| toast.level == level).count()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn replace_keeps_position_and_id() {
        let mut queue = ToastQueue::default();
        let first = queue.success("saved");
        let pending = queue.push(ToastLevel::Loading, "Uploading 2 file(s)...");
        queue.error("boom");

        assert_eq!(
            queue.replace(pending, ToastLevel::Success, "2 file(s) uploaded successfully!"),
            pending
        );
        let ids: Vec<u64> = queue.iter().map(|toast| toast.id).collect();
        assert_eq!(ids, vec![first, pending, pending + 1]);
        assert_eq!(queue.count(ToastLevel::Loading), 0);
    }

    #[test]
    fn replacing_a_dismissed_toast_appends() {
        let mut queue = ToastQueue::default();
        let pending = queue.push(ToastLevel::Loading, "working");
        assert!(queue.dismiss(pending));
        assert!(!queue.dismiss(pending));

        let id = queue.replace(pending, ToastLevel::Error, "failed");
        assert_ne!(id, pending);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.last().map(|toast| toast.message.as_str()), Some("failed"));
    }
}
