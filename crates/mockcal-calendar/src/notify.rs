//! One-way notification channel from the service to its host.
//!
//! The service emits exactly one notification per completed operation; how it
//! is shown (toast, log line, status bar) is up to the host.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
}

impl Notification {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Receiver of service notifications. Fire-and-forget: no acknowledgment.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Forwards notifications into an unbounded channel; a closed receiver is ignored.
impl Notifier for mpsc::UnboundedSender<Notification> {
    fn notify(&self, notification: Notification) {
        if self.send(notification).is_err() {
            tracing::debug!("Notification receiver dropped");
        }
    }
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!(text = %notification.text, "notification"),
            NotificationLevel::Error => tracing::error!(text = %notification.text, "notification"),
        }
    }
}

/// Keeps every notification in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    received: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<Notification> {
        self.received.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.received.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.received.lock().is_empty()
    }

    /// Drain everything received so far.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.received.lock())
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.received.lock().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_notifier_keeps_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notification::success("one"));
        notifier.notify(Notification::error("two"));

        let received = notifier.take();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].text, "one");
        assert!(received[1].is_error());
        assert!(notifier.is_empty());
    }

    #[tokio::test]
    async fn channel_notifier_forwards() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.notify(Notification::success("Signed in"));
        assert_eq!(rx.recv().await, Some(Notification::success("Signed in")));
    }

    #[test]
    fn tracing_notifier_accepts_both_levels() {
        let notifier: std::sync::Arc<dyn Notifier> = std::sync::Arc::new(TracingNotifier);
        notifier.notify(Notification::success("Event created (mock)"));
        notifier.notify(Notification::error("Failed to create event"));
    }

    #[test]
    fn channel_notifier_ignores_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        tx.notify(Notification::error("nobody listening"));
    }
}
