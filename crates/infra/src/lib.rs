mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{
    INotificationRepo, IProjectRepo, IReminderReceiptRepo, ITaskRepo, IUserRepo, Repos,
};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct TaskwardenContext {
    pub repos: Repos,
    pub config: Config,
    pub email: Arc<dyn IEmailService>,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl TaskwardenContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let email = Arc::new(RelayEmailService::new(
            config.email_relay_url.clone(),
            config.email_relay_key.clone(),
        ));
        Self {
            repos,
            config,
            email,
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> TaskwardenContext {
    TaskwardenContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

/// Context backed by in-memory stores and a noop email gateway, for tests
pub fn setup_context_inmemory() -> TaskwardenContext {
    TaskwardenContext {
        repos: Repos::create_inmemory(),
        config: Config::new(),
        email: Arc::new(NoopEmailService {}),
        sys: Arc::new(RealSys {}),
    }
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
