//! Non-fatal findings collected while reading or editing a drawing.
//!
//! Problems the reader can recover from (a section without ENDSEC in
//! failsafe mode, a missing EOF marker, a malformed CIRCLE skipped by the
//! scanner) end up in [`CadDocument::notifications`](crate::CadDocument)
//! instead of aborting the whole operation. Every notification is mirrored
//! to the `log` facade when it is recorded.

use std::fmt;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// Something was left out or repaired; the result is still usable
    Warning,
    /// A structural problem that failsafe mode recovered from
    Error,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// A single recorded finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub notification_type: NotificationType,
    pub message: String,
}

impl Notification {
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.notification_type, self.message)
    }
}

/// Notifications of one document, in the order they were raised
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification and forward it to the logger
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        let notification = Notification::new(notification_type, message);
        match notification.notification_type {
            NotificationType::Warning => log::warn!("{}", notification.message),
            NotificationType::Error => log::error!("{}", notification.message),
        }
        self.items.push(notification);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Notifications of one severity
    pub fn of_type(&self, nt: NotificationType) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(move |n| n.notification_type == nt)
    }

    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.of_type(nt).next().is_some()
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
