use super::INotificationRepo;
use taskwarden_domain::{Notification, NotificationType, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    user_uid: Uuid,
    notification_type: String,
    title: String,
    message: String,
    task_uid: Option<Uuid>,
    project_uid: Option<Uuid>,
    ts: i64,
    is_read: bool,
}

impl Into<Notification> for NotificationRaw {
    fn into(self) -> Notification {
        Notification {
            id: self.notification_uid.into(),
            user_id: self.user_uid.into(),
            notification_type: self
                .notification_type
                .parse()
                .unwrap_or(NotificationType::Deadline),
            title: self.title,
            message: self.message,
            task_id: self.task_uid.map(|uid| uid.into()),
            project_id: self.project_uid.map(|uid| uid.into()),
            timestamp: self.ts,
            read: self.is_read,
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications
            (notification_uid, user_uid, notification_type, title, message, task_uid, project_uid, ts, is_read)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.user_id.inner_ref())
        .bind(notification.notification_type.to_string())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.task_id.as_ref().map(|id| *id.inner_ref()))
        .bind(notification.project_id.as_ref().map(|id| *id.inner_ref()))
        .bind(notification.timestamp)
        .bind(notification.read)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: &ID,
        unread_only: bool,
        limit: usize,
    ) -> Vec<Notification> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications
            WHERE user_uid = $1 AND (is_read = FALSE OR $2 = FALSE)
            ORDER BY ts DESC
            LIMIT $3
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(unread_only)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|notification| notification.into())
        .collect()
    }

    async fn mark_read(&self, notification_id: &ID) -> Option<Notification> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE notification_uid = $1
            RETURNING *
            "#,
        )
        .bind(notification_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|notification| notification.into())
    }

    async fn mark_all_read(&self, user_id: &ID) -> usize {
        sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE user_uid = $1 AND is_read = FALSE
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await
        .map(|res| res.rows_affected() as usize)
        .unwrap_or(0)
    }

    async fn delete(&self, notification_id: &ID) -> Option<Notification> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            DELETE FROM notifications
            WHERE notification_uid = $1
            RETURNING *
            "#,
        )
        .bind(notification_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|notification| notification.into())
    }
}
