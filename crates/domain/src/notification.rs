use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// An in-app notification delivered to a single user.
///
/// Created once on dispatch; afterwards only the `read` flag changes, or the
/// notification is deleted.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: ID,
    pub user_id: ID,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub task_id: Option<ID>,
    pub project_id: Option<ID>,
    /// Millisecond timestamp of creation
    pub timestamp: i64,
    pub read: bool,
}

impl Entity for Notification {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    TaskAssigned,
    Deadline,
    TaskUpdated,
}

impl Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::TaskAssigned => "task_assigned",
            Self::Deadline => "deadline",
            Self::TaskUpdated => "task_updated",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task_assigned" => Ok(Self::TaskAssigned),
            "deadline" => Ok(Self::Deadline),
            "task_updated" => Ok(Self::TaskUpdated),
            _ => Err(format!("Invalid notification type: {}", s)),
        }
    }
}
