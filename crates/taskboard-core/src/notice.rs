use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// A user-facing message produced by a board operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub timestamp: DateTime<Utc>,
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: String) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message.into())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message.into())
    }
}

pub trait Notifier {
    fn notify(&mut self, notification: Notification);
    fn notifications(&self) -> &[Notification];
    fn drain_notifications(&mut self) -> Vec<Notification>;
}

impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }

    fn notifications(&self) -> &[Notification] {
        self
    }

    fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_the_sink() {
        let mut sink: Vec<Notification> = Vec::new();
        sink.notify(Notification::error("Failed to move task"));
        sink.notify(Notification::info("Column created"));
        assert_eq!(sink.notifications().len(), 2);

        let drained = sink.drain_notifications();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, NotificationLevel::Error);
        assert!(sink.notifications().is_empty());
    }
}
