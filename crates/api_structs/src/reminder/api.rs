use serde::{Deserialize, Serialize};

pub mod run_deadline_check {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        pub notifications_created: usize,
    }

    impl APIResponse {
        pub fn new(notifications_created: usize) -> Self {
            Self {
                message: "Deadline check completed".into(),
                notifications_created,
            }
        }
    }
}
