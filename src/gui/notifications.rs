//! Notification system for the GUI
//!
//! Keeps a bounded, timestamped history of wallet outcomes and app messages.

use crate::wallet::WalletEvent;
use std::collections::VecDeque;

/// Oldest entries are dropped past this count
pub const MAX_NOTIFICATIONS: usize = 50;

/// A notification entry with message and timestamp
#[derive(Clone)]
pub struct NotificationEntry {
    pub message: String,
    pub is_error: bool,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl NotificationEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
            timestamp: chrono::Local::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::new(message)
        }
    }

    pub fn time_ago(&self) -> String {
        Self::format_age(chrono::Local::now().signed_duration_since(self.timestamp), self.timestamp)
    }

    fn format_age(
        duration: chrono::Duration,
        timestamp: chrono::DateTime<chrono::Local>,
    ) -> String {
        if duration.num_seconds() < 60 {
            "just now".to_string()
        } else if duration.num_minutes() < 60 {
            format!("{}m ago", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h ago", duration.num_hours())
        } else {
            timestamp.format("%m/%d %H:%M").to_string()
        }
    }
}

impl From<WalletEvent> for NotificationEntry {
    fn from(event: WalletEvent) -> Self {
        match event {
            WalletEvent::Completed(msg) => NotificationEntry::new(msg),
            WalletEvent::Rejected(msg) => NotificationEntry::error(msg),
        }
    }
}

/// Bounded notification history, newest last
#[derive(Default)]
pub struct Notifications {
    entries: VecDeque<NotificationEntry>,
}

impl Notifications {
    pub fn push(&mut self, entry: impl Into<NotificationEntry>) {
        self.entries.push_back(entry.into());
        while self.entries.len() > MAX_NOTIFICATIONS {
            self.entries.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NotificationEntry::new(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationEntry::error(message));
    }

    /// Newest first
    pub fn recent(&self) -> impl Iterator<Item = &NotificationEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut notifications = Notifications::default();
        for i in 0..(MAX_NOTIFICATIONS + 5) {
            notifications.info(format!("msg {}", i));
        }
        assert_eq!(notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(
            notifications.recent().next().unwrap().message,
            format!("msg {}", MAX_NOTIFICATIONS + 4)
        );
        assert_eq!(notifications.recent().last().unwrap().message, "msg 5");
    }

    #[test]
    fn test_wallet_events_map_to_severity() {
        let ok: NotificationEntry = WalletEvent::Completed("done".into()).into();
        let bad: NotificationEntry = WalletEvent::Rejected("nope".into()).into();
        assert!(!ok.is_error);
        assert!(bad.is_error);
        assert_eq!(bad.message, "nope");
    }

    #[test]
    fn test_format_age() {
        let now = chrono::Local::now();
        assert_eq!(
            NotificationEntry::format_age(chrono::Duration::seconds(10), now),
            "just now"
        );
        assert_eq!(
            NotificationEntry::format_age(chrono::Duration::minutes(5), now),
            "5m ago"
        );
        assert_eq!(
            NotificationEntry::format_age(chrono::Duration::hours(3), now),
            "3h ago"
        );
    }

    #[test]
    fn test_new_entry_is_just_now() {
        assert_eq!(NotificationEntry::new("x").time_ago(), "just now");
    }
}
