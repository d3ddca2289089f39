use super::IProjectRepo;
use crate::repos::shared::inmemory_repo::*;
use taskwarden_domain::{Project, ID};

pub struct InMemoryProjectRepo {
    projects: std::sync::Mutex<Vec<Project>>,
}

impl InMemoryProjectRepo {
    pub fn new() -> Self {
        Self {
            projects: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IProjectRepo for InMemoryProjectRepo {
    async fn insert(&self, project: &Project) -> anyhow::Result<()> {
        insert(project, &self.projects);
        Ok(())
    }

    async fn find(&self, project_id: &ID) -> Option<Project> {
        find(project_id, &self.projects)
    }
}
