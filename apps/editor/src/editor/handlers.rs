//! Axum route handlers for editor sessions.
//!
//! Each handler maps one front-end event onto the session and answers with a
//! fresh snapshot of it.

use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::editor::fields::FieldId;
use crate::editor::registry::SessionHandle;
use crate::editor::session::{SessionSnapshot, SkillChange, SyncOutcome};
use crate::editor::EditorSession;
use crate::editor::skills::AddSkillOutcome;
use crate::errors::AppError;
use crate::models::UserId;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    /// Omitted or `null` opens a signed-out session.
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InputEvent {
    /// Changed values keyed by form element id.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub skill_input: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddSkillRequest {
    /// Typed into the skill input before adding; the current input otherwise.
    #[serde(default)]
    pub skill: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveSkillRequest {
    pub tag: String,
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub sync: SyncOutcome,
    pub session: SessionSnapshot,
}

#[derive(Debug, Serialize)]
pub struct SkillResponse<T> {
    #[serde(flatten)]
    pub change: SkillChange<T>,
    pub session: SessionSnapshot,
}

#[derive(Debug, Serialize)]
pub struct AnimateStatsResponse {
    pub newly_animated: usize,
    pub session: SessionSnapshot,
}

/// Decodes an optional JSON body. An empty body yields the defaults; anything
/// else must be well-formed `application/json`.
fn optional_json<T: DeserializeOwned + Default>(
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"));
    if !is_json {
        return Err(AppError::Validation(
            "Request body must be sent as application/json".to_string(),
        ));
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Malformed request body: {e}")))
}

async fn session_handle(state: &AppState, id: Uuid) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let req: CreateSessionRequest = optional_json(&headers, &body)?;
    let user = match req.user_id.as_deref() {
        None => None,
        Some(raw) => Some(UserId::parse(raw).ok_or_else(|| {
            AppError::Validation("user_id must not be blank".to_string())
        })?),
    };
    let session =
        EditorSession::restore(state.store.as_ref(), user, state.config.initial_view).await?;
    let (id, handle) = state.sessions.insert(session).await;

    let session = handle.lock().await;
    match session.user() {
        Some(user) => info!("Opened session {id} for {user}"),
        None => info!("Opened session {id} without a signed-in user"),
    }
    Ok((StatusCode::CREATED, Json(session.snapshot(id))))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = session_handle(&state, id).await?;
    let session = handle.lock().await;
    Ok(Json(session.snapshot(id)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .remove(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    info!("Closed session {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/sessions/:id/fields
pub async fn handle_input(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(event): Json<InputEvent>,
) -> Result<Json<SyncResponse>, AppError> {
    let changes = event
        .fields
        .into_iter()
        .map(|(key, value)| Ok((key.parse::<FieldId>()?, value)))
        .collect::<Result<Vec<_>, AppError>>()?;

    let handle = session_handle(&state, id).await?;
    let mut session = handle.lock().await;
    let sync = session
        .apply_input(state.store.as_ref(), &changes, event.skill_input)
        .await?;
    Ok(Json(SyncResponse {
        sync,
        session: session.snapshot(id),
    }))
}

/// POST /api/v1/sessions/:id/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SkillResponse<AddSkillOutcome>>, AppError> {
    let req: AddSkillRequest = optional_json(&headers, &body)?;
    let handle = session_handle(&state, id).await?;
    let mut session = handle.lock().await;
    if let Some(skill) = req.skill {
        session.set_skill_input(skill);
    }
    let change = session.add_skill(state.store.as_ref()).await?;
    Ok(Json(SkillResponse {
        change,
        session: session.snapshot(id),
    }))
}

/// POST /api/v1/sessions/:id/skills/remove
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RemoveSkillRequest>,
) -> Result<Json<SkillResponse<usize>>, AppError> {
    let handle = session_handle(&state, id).await?;
    let mut session = handle.lock().await;
    let change = session.remove_skill(state.store.as_ref(), &req.tag).await?;
    Ok(Json(SkillResponse {
        change,
        session: session.snapshot(id),
    }))
}

/// POST /api/v1/sessions/:id/demo
pub async fn handle_demo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SyncResponse>, AppError> {
    let handle = session_handle(&state, id).await?;
    let mut session = handle.lock().await;
    let sync = session.populate_demo(state.store.as_ref()).await?;
    Ok(Json(SyncResponse {
        sync,
        session: session.snapshot(id),
    }))
}

/// POST /api/v1/sessions/:id/view/landing
pub async fn handle_show_landing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = session_handle(&state, id).await?;
    let mut session = handle.lock().await;
    session.show_landing();
    Ok(Json(session.snapshot(id)))
}

/// POST /api/v1/sessions/:id/view/editor
pub async fn handle_show_editor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = session_handle(&state, id).await?;
    let mut session = handle.lock().await;
    session.show_editor();
    Ok(Json(session.snapshot(id)))
}

/// GET /api/v1/sessions/:id/print
pub async fn handle_print(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let handle = session_handle(&state, id).await?;
    let document = handle.lock().await.print_document();
    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        document,
    ))
}

/// POST /api/v1/sessions/:id/stats/animate
///
/// Waits the configured delay without holding the session, then emphasizes
/// every stat that has not been animated yet.
pub async fn handle_animate_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnimateStatsResponse>, AppError> {
    let handle = session_handle(&state, id).await?;
    tokio::time::sleep(state.config.stat_animation_delay).await;
    let mut session = handle.lock().await;
    let newly_animated = session.animate_stats();
    Ok(Json(AnimateStatsResponse {
        newly_animated,
        session: session.snapshot(id),
    }))
}
