//! Storage collaborator: the per-user record store the editor reads from and
//! writes back to.
//!
//! `AppState` holds an `Arc<dyn UserStore>`; the backend is picked at startup
//! from config (PostgreSQL when `DATABASE_URL` is set, memory otherwise).

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{UserId, UserRecord};

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Malformed user record: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user_data(&self, user: &UserId) -> Result<Option<UserRecord>, StoreError>;

    /// Replaces the user's whole record.
    async fn save_user_data(&self, user: &UserId, data: &UserRecord) -> Result<(), StoreError>;
}
