use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use taskwarden_domain::{Notification, ID};

pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: &ID,
        unread_only: bool,
        limit: usize,
    ) -> Vec<Notification> {
        let mut notifications = find_by(&self.notifications, |n: &Notification| {
            n.user_id == *user_id && (!unread_only || !n.read)
        });
        notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        notifications.truncate(limit);
        notifications
    }

    async fn mark_read(&self, notification_id: &ID) -> Option<Notification> {
        let updated = update_many(
            &self.notifications,
            |n: &Notification| n.id == *notification_id,
            |n| n.read = true,
        );
        if updated == 0 {
            return None;
        }
        find(notification_id, &self.notifications)
    }

    async fn mark_all_read(&self, user_id: &ID) -> usize {
        update_many(
            &self.notifications,
            |n: &Notification| n.user_id == *user_id && !n.read,
            |n| n.read = true,
        )
    }

    async fn delete(&self, notification_id: &ID) -> Option<Notification> {
        delete(notification_id, &self.notifications)
    }
}
