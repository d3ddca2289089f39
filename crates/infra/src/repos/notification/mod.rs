mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationRepo;
pub use postgres::PostgresNotificationRepo;
use taskwarden_domain::{Notification, ID};

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    /// A user's notifications, newest first
    async fn find_by_user(
        &self,
        user_id: &ID,
        unread_only: bool,
        limit: usize,
    ) -> Vec<Notification>;
    async fn mark_read(&self, notification_id: &ID) -> Option<Notification>;
    /// Returns the number of notifications that changed from unread to read
    async fn mark_all_read(&self, user_id: &ID) -> usize;
    async fn delete(&self, notification_id: &ID) -> Option<Notification>;
}
