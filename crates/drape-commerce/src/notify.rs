//! User-facing notices.
//!
//! Stores report the outcome of each mutation as a short notice
//! ("Added X to cart"). How notices are shown is up to the host: the CLI
//! prints them, the default implementation logs them.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for user-facing notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);

    fn success(&self, message: &str) {
        self.notify(NotificationKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(NotificationKind::Error, message);
    }

    fn info(&self, message: &str) {
        self.notify(NotificationKind::Info, message);
    }
}

/// Emits every notice as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Error => tracing::warn!(kind = %kind, "{}", message),
            _ => tracing::info!(kind = %kind, "{}", message),
        }
    }
}

/// A notice captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Keeps every notice in memory. Used by tests and by hosts that render
/// notices in batches.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    entries: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.entries.lock().clone()
    }

    /// Message of the most recent notice.
    pub fn last_message(&self) -> Option<String> {
        self.entries.lock().last().map(|n| n.message.clone())
    }

    /// Drain recorded notices.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.entries.lock().push(Notification {
            kind,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.success("Added Navy Blue Suit to cart");
        notifier.error("Invalid promo code");

        let seen = notifier.notifications();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].kind, NotificationKind::Success);
        assert_eq!(seen[1].message, "Invalid promo code");
        assert_eq!(notifier.last_message().as_deref(), Some("Invalid promo code"));
    }

    #[test]
    fn test_take_drains() {
        let notifier = RecordingNotifier::new();
        notifier.info("Item already in wishlist");
        assert_eq!(notifier.take().len(), 1);
        assert!(notifier.notifications().is_empty());
    }
}
