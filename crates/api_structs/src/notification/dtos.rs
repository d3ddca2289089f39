use serde::{Deserialize, Serialize};
use taskwarden_domain::{Notification, NotificationType, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDTO {
    pub id: ID,
    pub user_id: ID,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub task_id: Option<ID>,
    pub project_id: Option<ID>,
    pub timestamp: i64,
    pub read: bool,
}

impl NotificationDTO {
    pub fn new(notification: Notification) -> Self {
        Self {
            id: notification.id,
            user_id: notification.user_id,
            notification_type: notification.notification_type,
            title: notification.title,
            message: notification.message,
            task_id: notification.task_id,
            project_id: notification.project_id,
            timestamp: notification.timestamp,
            read: notification.read,
        }
    }
}
