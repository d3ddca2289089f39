use super::IProjectRepo;
use taskwarden_domain::{Project, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresProjectRepo {
    pool: PgPool,
}

impl PostgresProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProjectRaw {
    project_uid: Uuid,
    name: String,
}

impl Into<Project> for ProjectRaw {
    fn into(self) -> Project {
        Project {
            id: self.project_uid.into(),
            name: self.name,
        }
    }
}

#[async_trait::async_trait]
impl IProjectRepo for PostgresProjectRepo {
    async fn insert(&self, project: &Project) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO projects
            (project_uid, name)
            VALUES($1, $2)
            "#,
        )
        .bind(project.id.inner_ref())
        .bind(&project.name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, project_id: &ID) -> Option<Project> {
        sqlx::query_as::<_, ProjectRaw>(
            r#"
            SELECT * FROM projects
            WHERE project_uid = $1
            "#,
        )
        .bind(project_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|project| project.into())
    }
}
