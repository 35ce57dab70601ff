//! User-facing notices.
//!
//! Operation outcomes are emitted as [`Notice`]s over an mpsc channel; the
//! rendering layer drains the receiver. Emitting never blocks the operation:
//! a full or closed channel simply drops the notice.

use tokio::sync::mpsc;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A single user-facing notification.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Sending half, cheap to clone into every service.
#[derive(Debug, Clone)]
pub struct NoticeSender {
    tx: mpsc::Sender<Notice>,
}

impl NoticeSender {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Notice>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(NoticeLevel::Success, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(NoticeLevel::Info, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(NoticeLevel::Error, message.into());
    }

    fn emit(&self, level: NoticeLevel, message: String) {
        tracing::debug!(level = ?level, message = %message, "notice");
        let _ = self.tx.try_send(Notice { level, message });
    }
}
