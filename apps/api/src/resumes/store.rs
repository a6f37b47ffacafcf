//! Resume persistence — trait-based so handlers never see the backing store.
//!
//! `AppState` holds an `Arc<dyn ResumeStore>`: `PgResumeStore` in production,
//! `MemoryResumeStore` in tests.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewResume, Resume, ResumePatch};

/// Single-record operations over the resume collection.
/// Every method is one round trip; atomicity is per record.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// All resumes owned by `owner`, newest first.
    async fn find_by_owner(&self, owner: &str) -> Result<Vec<Resume>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Resume>, AppError>;

    async fn insert(&self, new: NewResume) -> Result<Resume, AppError>;

    /// Writes the present patch fields. `None` when the record no longer exists.
    async fn update(&self, id: Uuid, patch: &ResumePatch) -> Result<Option<Resume>, AppError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

/// PostgreSQL-backed store over the `resumes` table.
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        PgResumeStore { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn find_by_owner(&self, owner: &str) -> Result<Vec<Resume>, AppError> {
        Ok(sqlx::query_as::<_, Resume>(
            "SELECT * FROM resumes WHERE owner = $1 ORDER BY created_at DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        Ok(
            sqlx::query_as::<_, Resume>("SELECT * FROM resumes WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert(&self, new: NewResume) -> Result<Resume, AppError> {
        Ok(sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes (owner, title, content)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&new.owner)
        .bind(&new.title)
        .bind(&new.content)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update(&self, id: Uuid, patch: &ResumePatch) -> Result<Option<Resume>, AppError> {
        // NULL parameters keep the stored value, matching Resume::apply
        Ok(sqlx::query_as::<_, Resume>(
            r#"
            UPDATE resumes
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.content)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
