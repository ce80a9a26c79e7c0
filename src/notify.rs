//! Transient user-facing notifications.

use crate::constants::NOTIFICATION_DURATION_MS;

/// Severity level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral information, e.g. a discarded gesture.
    Info,
    /// A completed action.
    Success,
    /// A failed action; state was left as it was before the action.
    Error,
}

/// A transient notice shown to the user and then auto-dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Human-readable message.
    pub message: String,
    /// Severity level.
    pub severity: Severity,
    /// How long the host should keep the notice visible.
    pub duration_ms: u64,
}

impl Notification {
    /// Create a notification with the given severity.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            duration_ms: NOTIFICATION_DURATION_MS,
        }
    }

    /// Create an info-level notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    /// Create a success-level notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    /// Create an error-level notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }
}
