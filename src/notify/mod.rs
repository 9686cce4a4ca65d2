// ============================================================================
// User-Facing Notifications
// ============================================================================

use tokio::sync::broadcast;
use tracing::{info, warn};

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One user-facing message, e.g. "Failed to delete the color".
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Side channel for user-facing notices. The presentation layer subscribes
/// and renders; the execution drivers post here when a remote confirmation
/// fails. Notices are mirrored to tracing so headless runs keep a record.
///
/// Cheap to clone; clones share the same channel.
#[derive(Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notice>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn info(&self, message: impl Into<String>) {
        self.post(NoticeLevel::Info, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.post(NoticeLevel::Error, message.into());
    }

    fn post(&self, level: NoticeLevel, message: String) {
        match level {
            NoticeLevel::Info => info!(notice = %message),
            NoticeLevel::Error => warn!(notice = %message),
        }
        // send only fails when nobody is subscribed, which is fine
        let _ = self.tx.send(Notice { level, message });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
