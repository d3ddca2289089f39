mod inmemory;
mod postgres;

pub use inmemory::InMemoryTaskRepo;
pub use postgres::PostgresTaskRepo;
use taskwarden_domain::{Task, ID};

#[async_trait::async_trait]
pub trait ITaskRepo: Send + Sync {
    async fn insert(&self, task: &Task) -> anyhow::Result<()>;
    async fn save(&self, task: &Task) -> anyhow::Result<()>;
    async fn find(&self, task_id: &ID) -> Option<Task>;
    /// All tasks that are neither soft-deleted nor completed
    async fn find_active(&self) -> anyhow::Result<Vec<Task>>;
    async fn delete(&self, task_id: &ID) -> Option<Task>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context_inmemory;
    use taskwarden_domain::{Task, TaskStatus};

    fn task_factory() -> Task {
        Task {
            id: Default::default(),
            name: "Prepare audit".into(),
            description: "".into(),
            project_id: None,
            status: TaskStatus::Ongoing,
            priority: 5,
            start_ts: Some(0),
            end_ts: Some(1000 * 60 * 60),
            assigned_to: Vec::new(),
            deleted: false,
            recurrence: None,
            created: 0,
            updated: 0,
        }
    }

    #[tokio::test]
    async fn insert_and_find_roundtrip() {
        let ctx = setup_context_inmemory();
        let task = task_factory();
        ctx.repos.tasks.insert(&task).await.unwrap();
        let found = ctx.repos.tasks.find(&task.id).await.unwrap();
        assert_eq!(found.id, task.id);
        assert_eq!(found.name, task.name);
    }

    #[tokio::test]
    async fn find_active_excludes_deleted_and_completed() {
        let ctx = setup_context_inmemory();

        let active = task_factory();
        ctx.repos.tasks.insert(&active).await.unwrap();

        let mut completed = task_factory();
        completed.status = TaskStatus::Completed;
        ctx.repos.tasks.insert(&completed).await.unwrap();

        let mut deleted = task_factory();
        deleted.deleted = true;
        ctx.repos.tasks.insert(&deleted).await.unwrap();

        let found = ctx.repos.tasks.find_active().await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, active.id);
    }

    #[tokio::test]
    async fn save_updates_existing_task() {
        let ctx = setup_context_inmemory();
        let mut task = task_factory();
        ctx.repos.tasks.insert(&task).await.unwrap();

        task.status = TaskStatus::Completed;
        ctx.repos.tasks.save(&task).await.unwrap();

        assert!(ctx.repos.tasks.find_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_task() {
        let ctx = setup_context_inmemory();
        let task = task_factory();
        ctx.repos.tasks.insert(&task).await.unwrap();

        assert!(ctx.repos.tasks.delete(&task.id).await.is_some());
        assert!(ctx.repos.tasks.find(&task.id).await.is_none());
        assert!(ctx.repos.tasks.delete(&task.id).await.is_none());
    }
}
