mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderReceiptRepo;
pub use postgres::PostgresReminderReceiptRepo;
use taskwarden_domain::{ReminderReceipt, ID};

/// Tracks when a deadline reminder was last dispatched per `(task, user)`
/// pair. The deadline scan consults this store before dispatching and
/// records a receipt after every created notification.
#[async_trait::async_trait]
pub trait IReminderReceiptRepo: Send + Sync {
    async fn find(&self, task_id: &ID, user_id: &ID) -> Option<ReminderReceipt>;
    async fn upsert(&self, receipt: &ReminderReceipt) -> anyhow::Result<()>;
}
