//! /sessions handlers — creation, inspection, walk control, deletion.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use stride_core::types::{SessionState, Snapshot};

use super::{error_response, ApiState};

// ── /sessions (POST) ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
}

#[derive(Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub total_questions: usize,
}

pub async fn handle_session_create(
    State(state): State<ApiState>,
    Json(req): Json<CreateSessionRequest>,
) -> Json<CreateSessionResponse> {
    let (session_id, _) = state.registry.create(&req.name, state.questions.clone());

    Json(CreateSessionResponse {
        session_id,
        total_questions: state.questions.len(),
    })
}

// ── /sessions (GET) ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionSummary>,
}

#[derive(Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub name: String,
    pub state: SessionState,
    pub participants: usize,
    pub current_question: i64,
    pub total_questions: usize,
}

pub async fn handle_session_list(State(state): State<ApiState>) -> Json<SessionListResponse> {
    let mut sessions = Vec::new();
    for (id, handle) in state.registry.entries() {
        let snap = handle.snapshot().await;
        sessions.push(SessionSummary {
            session_id: id,
            name: snap.name,
            state: snap.state,
            participants: snap.participants.len(),
            current_question: snap.current_question,
            total_questions: snap.total_questions,
        });
    }
    Json(SessionListResponse { sessions })
}

// ── /sessions/:id (GET) ───────────────────────────────────────────────────────

pub async fn handle_session_inspect(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> Result<Json<Snapshot>, (StatusCode, String)> {
    let handle = state.registry.get(&session_id).map_err(error_response)?;
    Ok(Json(handle.snapshot().await))
}

// ── /sessions/:id (DELETE) ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SessionDeleteResponse {
    pub session_id: String,
    pub deleted: bool,
}

pub async fn handle_session_delete(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> Json<SessionDeleteResponse> {
    let deleted = state.registry.remove(&session_id);

    if deleted {
        tracing::info!(session_id = %session_id, "session deleted via API");
    }

    Json(SessionDeleteResponse {
        session_id,
        deleted,
    })
}

// ── /sessions/:id/start (POST) ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StartResponse {
    pub session_id: String,
    pub started: bool,
}

pub async fn handle_session_start(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> Result<Json<StartResponse>, (StatusCode, String)> {
    let handle = state.registry.get(&session_id).map_err(error_response)?;
    handle.start().await.map_err(error_response)?;

    Ok(Json(StartResponse {
        session_id,
        started: true,
    }))
}

// ── /sessions/:id/reset (POST) ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ResetResponse {
    pub session_id: String,
    pub reset: bool,
}

pub async fn handle_session_reset(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> Result<Json<ResetResponse>, (StatusCode, String)> {
    let handle = state.registry.get(&session_id).map_err(error_response)?;
    handle.reset().await.map_err(error_response)?;

    Ok(Json(ResetResponse {
        session_id,
        reset: true,
    }))
}
