use std::sync::Arc;

use crate::config::Config;
use crate::editor::registry::SessionRegistry;
use crate::storage::UserStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Per-user record store. PostgreSQL or in-memory, picked at startup.
    pub store: Arc<dyn UserStore>,
    pub sessions: SessionRegistry,
    pub config: Config,
}
