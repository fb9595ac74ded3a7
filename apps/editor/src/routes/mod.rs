pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::editor::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_close_session),
        )
        .route(
            "/api/v1/sessions/:id/fields",
            patch(handlers::handle_input),
        )
        .route(
            "/api/v1/sessions/:id/skills",
            post(handlers::handle_add_skill),
        )
        .route(
            "/api/v1/sessions/:id/skills/remove",
            post(handlers::handle_remove_skill),
        )
        .route("/api/v1/sessions/:id/demo", post(handlers::handle_demo))
        .route(
            "/api/v1/sessions/:id/view/landing",
            post(handlers::handle_show_landing),
        )
        .route(
            "/api/v1/sessions/:id/view/editor",
            post(handlers::handle_show_editor),
        )
        .route("/api/v1/sessions/:id/print", get(handlers::handle_print))
        .route(
            "/api/v1/sessions/:id/stats/animate",
            post(handlers::handle_animate_stats),
        )
        .with_state(state)
}
