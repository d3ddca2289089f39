use super::ITaskRepo;
use taskwarden_domain::{Task, TaskStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresTaskRepo {
    pool: PgPool,
}

impl PostgresTaskRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TaskRaw {
    task_uid: Uuid,
    name: String,
    description: String,
    project_uid: Option<Uuid>,
    status: String,
    priority: i64,
    start_ts: Option<i64>,
    end_ts: Option<i64>,
    assigned_to: Vec<Uuid>,
    deleted: bool,
    recurrence: Option<serde_json::Value>,
    created: i64,
    updated: i64,
}

impl Into<Task> for TaskRaw {
    fn into(self) -> Task {
        Task {
            id: self.task_uid.into(),
            name: self.name,
            description: self.description,
            project_id: self.project_uid.map(|uid| uid.into()),
            // Unknown status strings stay scannable
            status: self.status.parse().unwrap_or(TaskStatus::Ongoing),
            priority: self.priority,
            start_ts: self.start_ts,
            end_ts: self.end_ts,
            assigned_to: self.assigned_to.into_iter().map(|uid| uid.into()).collect(),
            deleted: self.deleted,
            // A malformed recurrence document is treated as no recurrence
            recurrence: self
                .recurrence
                .and_then(|r| serde_json::from_value(r).ok()),
            created: self.created,
            updated: self.updated,
        }
    }
}

fn assigned_to_raw(task: &Task) -> Vec<Uuid> {
    task.assigned_to.iter().map(|id| *id.inner_ref()).collect()
}

fn recurrence_raw(task: &Task) -> anyhow::Result<Option<serde_json::Value>> {
    task.recurrence
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(anyhow::Error::from)
}

#[async_trait::async_trait]
impl ITaskRepo for PostgresTaskRepo {
    async fn insert(&self, task: &Task) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks
            (task_uid, name, description, project_uid, status, priority, start_ts, end_ts, assigned_to, deleted, recurrence, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(task.id.inner_ref())
        .bind(&task.name)
        .bind(&task.description)
        .bind(task.project_id.as_ref().map(|id| *id.inner_ref()))
        .bind(task.status.to_string())
        .bind(task.priority)
        .bind(task.start_ts)
        .bind(task.end_ts)
        .bind(assigned_to_raw(task))
        .bind(task.deleted)
        .bind(recurrence_raw(task)?)
        .bind(task.created)
        .bind(task.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, task: &Task) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE tasks SET
                name = $2,
                description = $3,
                project_uid = $4,
                status = $5,
                priority = $6,
                start_ts = $7,
                end_ts = $8,
                assigned_to = $9,
                deleted = $10,
                recurrence = $11,
                updated = $12
            WHERE task_uid = $1
            "#,
        )
        .bind(task.id.inner_ref())
        .bind(&task.name)
        .bind(&task.description)
        .bind(task.project_id.as_ref().map(|id| *id.inner_ref()))
        .bind(task.status.to_string())
        .bind(task.priority)
        .bind(task.start_ts)
        .bind(task.end_ts)
        .bind(assigned_to_raw(task))
        .bind(task.deleted)
        .bind(recurrence_raw(task)?)
        .bind(task.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, task_id: &ID) -> Option<Task> {
        sqlx::query_as::<_, TaskRaw>(
            r#"
            SELECT * FROM tasks
            WHERE task_uid = $1
            "#,
        )
        .bind(task_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|task| task.into())
    }

    async fn find_active(&self) -> anyhow::Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, TaskRaw>(
            r#"
            SELECT * FROM tasks
            WHERE deleted = FALSE AND status != 'completed'
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks.into_iter().map(|task| task.into()).collect())
    }

    async fn delete(&self, task_id: &ID) -> Option<Task> {
        sqlx::query_as::<_, TaskRaw>(
            r#"
            DELETE FROM tasks
            WHERE task_uid = $1
            RETURNING *
            "#,
        )
        .bind(task_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|task| task.into())
    }
}
