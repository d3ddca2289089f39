mod notification;
mod project;
mod reminder_receipt;
mod shared;
mod task;
mod user;

pub use notification::INotificationRepo;
use notification::{InMemoryNotificationRepo, PostgresNotificationRepo};
pub use project::IProjectRepo;
use project::{InMemoryProjectRepo, PostgresProjectRepo};
pub use reminder_receipt::IReminderReceiptRepo;
use reminder_receipt::{InMemoryReminderReceiptRepo, PostgresReminderReceiptRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use task::ITaskRepo;
use task::{InMemoryTaskRepo, PostgresTaskRepo};
pub use user::IUserRepo;
use user::{InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub tasks: Arc<dyn ITaskRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub projects: Arc<dyn IProjectRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
    pub reminder_receipts: Arc<dyn IReminderReceiptRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        Ok(Self {
            tasks: Arc::new(PostgresTaskRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            projects: Arc::new(PostgresProjectRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool.clone())),
            reminder_receipts: Arc::new(PostgresReminderReceiptRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            tasks: Arc::new(InMemoryTaskRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            projects: Arc::new(InMemoryProjectRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
            reminder_receipts: Arc::new(InMemoryReminderReceiptRepo::new()),
        }
    }
}
