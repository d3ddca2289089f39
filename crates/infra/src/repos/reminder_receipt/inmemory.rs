use super::IReminderReceiptRepo;
use std::sync::Mutex;
use taskwarden_domain::{ReminderReceipt, ID};

pub struct InMemoryReminderReceiptRepo {
    receipts: Mutex<Vec<ReminderReceipt>>,
}

impl InMemoryReminderReceiptRepo {
    pub fn new() -> Self {
        Self {
            receipts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderReceiptRepo for InMemoryReminderReceiptRepo {
    async fn find(&self, task_id: &ID, user_id: &ID) -> Option<ReminderReceipt> {
        let receipts = self.receipts.lock().unwrap();
        receipts
            .iter()
            .find(|r| r.task_id == *task_id && r.user_id == *user_id)
            .cloned()
    }

    async fn upsert(&self, receipt: &ReminderReceipt) -> anyhow::Result<()> {
        let mut receipts = self.receipts.lock().unwrap();
        for existing in receipts.iter_mut() {
            if existing.task_id == receipt.task_id && existing.user_id == receipt.user_id {
                existing.last_notified_at = receipt.last_notified_at;
                return Ok(());
            }
        }
        receipts.push(receipt.clone());
        Ok(())
    }
}
