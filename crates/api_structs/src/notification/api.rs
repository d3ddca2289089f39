use crate::dtos::NotificationDTO;
use serde::{Deserialize, Serialize};
use taskwarden_domain::{Notification, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification: NotificationDTO,
}

impl NotificationResponse {
    pub fn new(notification: Notification) -> Self {
        Self {
            notification: NotificationDTO::new(notification),
        }
    }
}

pub mod get_notifications {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub limit: Option<usize>,
        pub unread_only: Option<bool>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notifications: Vec<NotificationDTO>,
        pub count: usize,
    }

    impl APIResponse {
        pub fn new(notifications: Vec<Notification>) -> Self {
            let notifications: Vec<_> =
                notifications.into_iter().map(NotificationDTO::new).collect();
            Self {
                count: notifications.len(),
                notifications,
            }
        }
    }
}

pub mod mark_notification_read {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub notification_id: ID,
    }

    pub type APIResponse = NotificationResponse;
}

pub mod mark_all_notifications_read {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        pub count: usize,
    }

    impl APIResponse {
        pub fn new(count: usize) -> Self {
            Self {
                message: format!("{} notifications marked as read", count),
                count,
            }
        }
    }
}

pub mod delete_notification {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub notification_id: ID,
    }

    pub type APIResponse = NotificationResponse;
}
