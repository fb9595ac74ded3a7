use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;

use crate::models::{UserId, UserRecord};
use crate::storage::{StoreError, UserStore};

/// Record store backed by one JSONB document per user.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        PgUserStore { pool }
    }

    /// Creates the `user_data` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_data (
                user_id    TEXT PRIMARY KEY,
                data       JSONB NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        info!("user_data table ready");
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get_user_data(&self, user: &UserId) -> Result<Option<UserRecord>, StoreError> {
        let data: Option<Value> =
            sqlx::query_scalar("SELECT data FROM user_data WHERE user_id = $1")
                .bind(user.as_str())
                .fetch_optional(&self.pool)
                .await?;
        data.map(serde_json::from_value)
            .transpose()
            .map_err(StoreError::from)
    }

    async fn save_user_data(&self, user: &UserId, data: &UserRecord) -> Result<(), StoreError> {
        let doc = serde_json::to_value(data)?;
        sqlx::query(
            r#"
            INSERT INTO user_data (user_id, data, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
                SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user.as_str())
        .bind(doc)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
