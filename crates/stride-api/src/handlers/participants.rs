//! /sessions/:id/join and participant removal handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{error_response, ApiState};

// ── /sessions/:id/join (POST) ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct JoinRequest {
    pub nickname: String,
}

#[derive(Serialize)]
pub struct JoinResponse {
    /// Session-scoped identity. The client holds on to this as its
    /// reconnect token — presenting it later resumes the same participant.
    pub participant_id: String,
    pub session_id: String,
}

pub async fn handle_join(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
    Json(req): Json<JoinRequest>,
) -> Result<Json<JoinResponse>, (StatusCode, String)> {
    let handle = state.registry.get(&session_id).map_err(error_response)?;
    let participant_id = handle
        .join(&req.nickname, state.allow_late_join)
        .await
        .map_err(error_response)?;

    Ok(Json(JoinResponse {
        participant_id,
        session_id,
    }))
}

// ── /sessions/:id/participants/:participant_id (DELETE) ──────────────────────

#[derive(Serialize)]
pub struct RemoveResponse {
    pub participant_id: String,
    pub removed: bool,
    /// True when the removal closed the barrier and the walk advanced.
    pub advanced: bool,
}

pub async fn handle_participant_remove(
    State(state): State<ApiState>,
    Path((session_id, participant_id)): Path<(String, String)>,
) -> Result<Json<RemoveResponse>, (StatusCode, String)> {
    let handle = state.registry.get(&session_id).map_err(error_response)?;
    let advanced = handle
        .remove_participant(&participant_id)
        .await
        .map_err(error_response)?;

    tracing::info!(
        session_id = %session_id,
        participant_id = %participant_id,
        advanced,
        "participant removed via API"
    );

    Ok(Json(RemoveResponse {
        participant_id,
        removed: true,
        advanced,
    }))
}
