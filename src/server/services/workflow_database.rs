use crate::models::Workflow;
use sqlx::PgPool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowStoreError {
    #[error("Workflow {id} not found")]
    NotFound { id: i32 },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// All access to the `workflows` table. Every operation is a single SQL
/// statement; the engine's per-statement atomicity is the only transaction
/// model needed.
pub struct WorkflowDatabaseService {
    pool: PgPool,
}

impl WorkflowDatabaseService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_workflows(&self) -> Result<Vec<Workflow>, WorkflowStoreError> {
        let workflows = sqlx::query_as::<_, Workflow>(
            r#"
            SELECT id, name
            FROM workflows
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(workflows)
    }

    pub async fn create_workflow(&self, name: &str) -> Result<Workflow, WorkflowStoreError> {
        let workflow = sqlx::query_as::<_, Workflow>(
            r#"
            INSERT INTO workflows (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(workflow)
    }

    pub async fn update_workflow(&self, id: i32, name: &str) -> Result<Workflow, WorkflowStoreError> {
        let workflow = sqlx::query_as::<_, Workflow>(
            r#"
            UPDATE workflows
            SET name = $1
            WHERE id = $2
            RETURNING id, name
            "#,
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        workflow.ok_or(WorkflowStoreError::NotFound { id })
    }

    pub async fn delete_workflow(&self, id: i32) -> Result<Workflow, WorkflowStoreError> {
        let workflow = sqlx::query_as::<_, Workflow>(
            r#"
            DELETE FROM workflows
            WHERE id = $1
            RETURNING id, name
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        workflow.ok_or(WorkflowStoreError::NotFound { id })
    }
}
