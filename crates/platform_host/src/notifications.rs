//! Toast/notification surface contracts and adapters.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Visual severity of a user-facing notification.
pub enum Severity {
    /// Completed action.
    Success,
    /// Failed action.
    Error,
    /// Action that needs attention.
    Warning,
    /// Neutral status message.
    Info,
}

impl Severity {
    /// Returns the stable token used by presentation layers (for example as a CSS modifier).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A single notification as delivered to a [`NotificationService`].
pub struct Notification {
    /// Message body.
    pub message: String,
    /// Severity used for styling.
    pub severity: Severity,
}

/// Host service for non-blocking user-visible notifications.
///
/// Delivery is fire-and-forget: callers never depend on whether the message was shown.
pub trait NotificationService {
    /// Shows `message` with the given severity.
    fn notify(&self, message: &str, severity: Severity);
}

#[derive(Debug, Clone, Copy, Default)]
/// Notification service that drops every message.
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn notify(&self, _message: &str, _severity: Severity) {}
}

#[derive(Debug, Clone, Default)]
/// Notification service that queues messages in memory.
///
/// The desktop shell drains this queue into its toast stack; tests inspect it directly.
pub struct MemoryNotificationService {
    delivered: Rc<RefCell<Vec<Notification>>>,
}

impl MemoryNotificationService {
    /// Removes and returns every queued notification in delivery order.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.delivered.borrow_mut())
    }

    /// Returns the queued messages without draining them.
    pub fn messages(&self) -> Vec<String> {
        self.delivered
            .borrow()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}

impl NotificationService for MemoryNotificationService {
    fn notify(&self, message: &str, severity: Severity) {
        self.delivered.borrow_mut().push(Notification {
            message: message.to_string(),
            severity,
        });
    }
}
