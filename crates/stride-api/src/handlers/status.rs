//! /status and /daemon/shutdown handlers.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use stride_core::types::SessionState;

use super::ApiState;

// ── /status ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StatusResponse {
    pub uptime_secs: u64,
    pub total_questions: usize,
    pub sessions: Vec<SessionStatus>,
}

#[derive(Serialize)]
pub struct SessionStatus {
    pub session_id: String,
    pub name: String,
    pub state: SessionState,
    pub participants: usize,
    pub connected: usize,
    pub current_question: i64,
    pub answered_current: usize,
    pub uptime_secs: u64,
}

pub async fn handle_status(State(state): State<ApiState>) -> Json<StatusResponse> {
    let mut sessions = Vec::new();
    for (id, handle) in state.registry.entries() {
        let snap = handle.snapshot().await;
        sessions.push(SessionStatus {
            session_id: id,
            name: snap.name,
            state: snap.state,
            participants: snap.participants.len(),
            connected: snap.participants.iter().filter(|p| p.connected).count(),
            current_question: snap.current_question,
            answered_current: snap.answered_current,
            uptime_secs: handle.uptime_secs().await,
        });
    }

    Json(StatusResponse {
        uptime_secs: state.started_at.elapsed().as_secs(),
        total_questions: state.questions.len(),
        sessions,
    })
}

// ── /daemon/shutdown ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ShutdownResponse {
    pub shutting_down: bool,
}

pub async fn handle_shutdown(State(state): State<ApiState>) -> Json<ShutdownResponse> {
    tracing::info!("shutdown requested via API");
    let _ = state.shutdown_tx.send(());
    Json(ShutdownResponse {
        shutting_down: true,
    })
}
