use crate::shared::entity::ID;

/// Records when a deadline reminder was last sent for a `(task, user)`
/// pair, so a repeat reminder inside the dedupe window can be suppressed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderReceipt {
    pub task_id: ID,
    pub user_id: ID,
    /// Millisecond timestamp of the last dispatched reminder
    pub last_notified_at: i64,
}

impl ReminderReceipt {
    /// Whether a new reminder at `now_ts` falls inside the dedupe window
    /// and should be suppressed.
    pub fn suppresses(&self, now_ts: i64, dedupe_window_hours: i64) -> bool {
        now_ts - self.last_notified_at < dedupe_window_hours * 60 * 60 * 1000
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const HOUR: i64 = 60 * 60 * 1000;

    #[test]
    fn suppresses_inside_window() {
        let receipt = ReminderReceipt {
            task_id: Default::default(),
            user_id: Default::default(),
            last_notified_at: 0,
        };
        assert!(receipt.suppresses(22 * HOUR, 23));
        assert!(receipt.suppresses(23 * HOUR - 1, 23));
    }

    #[test]
    fn allows_after_window_elapses() {
        let receipt = ReminderReceipt {
            task_id: Default::default(),
            user_id: Default::default(),
            last_notified_at: 0,
        };
        assert!(!receipt.suppresses(23 * HOUR, 23));
        assert!(!receipt.suppresses(48 * HOUR, 23));
    }
}
