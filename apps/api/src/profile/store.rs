use async_trait::async_trait;
use sqlx::PgPool;

use crate::profile::models::{ProfileChanges, UserProfile};
use crate::store::StoreError;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<UserProfile>, StoreError>;

    /// Fails with `NotFound` if no user has `external_id`.
    async fn update_profile(
        &self,
        external_id: &str,
        changes: &ProfileChanges,
    ) -> Result<UserProfile, StoreError>;
}

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(
            sqlx::query_as::<_, UserProfile>("SELECT * FROM users WHERE external_id = $1")
                .bind(external_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn update_profile(
        &self,
        external_id: &str,
        changes: &ProfileChanges,
    ) -> Result<UserProfile, StoreError> {
        sqlx::query_as::<_, UserProfile>(
            r#"
            UPDATE users
            SET industry = $2, experience = $3, bio = $4, skills = $5, updated_at = now()
            WHERE external_id = $1
            RETURNING *
            "#,
        )
        .bind(external_id)
        .bind(&changes.industry)
        .bind(changes.experience)
        .bind(&changes.bio)
        .bind(&changes.skills)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound("User".to_string()))
    }
}
