use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl User {
    pub fn new(name: &str, email: &str, role: UserRole) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            email: email.into(),
            role,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Director,
    Manager,
    Staff,
}

impl UserRole {
    /// Deadline reminders are only delivered to staff members.
    pub fn receives_deadline_reminders(&self) -> bool {
        matches!(self, Self::Staff)
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Director => "director",
            Self::Manager => "manager",
            Self::Staff => "staff",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "director" => Ok(Self::Director),
            "manager" => Ok(Self::Manager),
            "staff" => Ok(Self::Staff),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_staff_receive_deadline_reminders() {
        assert!(UserRole::Staff.receives_deadline_reminders());
        assert!(!UserRole::Manager.receives_deadline_reminders());
        assert!(!UserRole::Director.receives_deadline_reminders());
    }
}
