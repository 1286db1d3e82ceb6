//! HTTP API handlers — exposes session state as JSON.

pub mod answers;
pub mod participants;
pub mod sessions;
pub mod status;

use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;

use stride_core::SessionError;
use stride_services::SessionRegistry;

#[derive(Clone)]
pub struct ApiState {
    pub registry: SessionRegistry,
    /// The deck every new session walks through.
    pub questions: Arc<Vec<String>>,
    /// Accept joins into completed sessions (kept for a potential reset).
    pub allow_late_join: bool,
    /// When the daemon started.
    pub started_at: Instant,
    /// Shutdown broadcast sender — signals graceful daemon shutdown.
    pub shutdown_tx: tokio::sync::broadcast::Sender<()>,
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Map engine errors onto HTTP. Invariant violations are logged here — they
/// indicate bookkeeping bugs that would desynchronize every client.
pub(crate) fn error_response(err: SessionError) -> (StatusCode, String) {
    let code = match &err {
        SessionError::SessionNotFound | SessionError::UnknownParticipant => StatusCode::NOT_FOUND,
        SessionError::InvalidState(_) => StatusCode::CONFLICT,
        SessionError::Invariant(_) => {
            tracing::error!(error = %err, "invariant violation surfaced to API");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (code, err.to_string())
}

// Re-export handler functions for use in router setup.
pub use answers::handle_answer_submit;
pub use participants::{handle_join, handle_participant_remove};
pub use sessions::{
    handle_session_create, handle_session_delete, handle_session_inspect, handle_session_list,
    handle_session_reset, handle_session_start,
};
pub use status::{handle_shutdown, handle_status};
