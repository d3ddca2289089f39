use super::IReminderReceiptRepo;
use taskwarden_domain::{ReminderReceipt, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderReceiptRepo {
    pool: PgPool,
}

impl PostgresReminderReceiptRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderReceiptRaw {
    task_uid: Uuid,
    user_uid: Uuid,
    last_notified_at: i64,
}

impl Into<ReminderReceipt> for ReminderReceiptRaw {
    fn into(self) -> ReminderReceipt {
        ReminderReceipt {
            task_id: self.task_uid.into(),
            user_id: self.user_uid.into(),
            last_notified_at: self.last_notified_at,
        }
    }
}

#[async_trait::async_trait]
impl IReminderReceiptRepo for PostgresReminderReceiptRepo {
    async fn find(&self, task_id: &ID, user_id: &ID) -> Option<ReminderReceipt> {
        sqlx::query_as::<_, ReminderReceiptRaw>(
            r#"
            SELECT * FROM reminder_receipts
            WHERE task_uid = $1 AND user_uid = $2
            "#,
        )
        .bind(task_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|receipt| receipt.into())
    }

    async fn upsert(&self, receipt: &ReminderReceipt) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_receipts
            (task_uid, user_uid, last_notified_at)
            VALUES($1, $2, $3)
            ON CONFLICT (task_uid, user_uid)
            DO UPDATE SET last_notified_at = EXCLUDED.last_notified_at
            "#,
        )
        .bind(receipt.task_id.inner_ref())
        .bind(receipt.user_id.inner_ref())
        .bind(receipt.last_notified_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
