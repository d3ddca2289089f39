mod inmemory;
mod postgres;

pub use inmemory::InMemoryProjectRepo;
pub use postgres::PostgresProjectRepo;
use taskwarden_domain::{Project, ID};

#[async_trait::async_trait]
pub trait IProjectRepo: Send + Sync {
    async fn insert(&self, project: &Project) -> anyhow::Result<()>;
    async fn find(&self, project_id: &ID) -> Option<Project>;
}
