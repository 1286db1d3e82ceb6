//! /sessions/:id/answers handler — the submit side of the answer barrier.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use stride_core::AnswerValue;
use stride_services::SubmitOutcome;

use super::{error_response, ApiState};

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub participant_id: String,
    pub question: usize,
    pub value: AnswerValue,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub recorded: bool,
    /// True when this was a retry of an already-recorded answer. Reported
    /// as success so clients are never punished for retrying.
    pub duplicate: bool,
    /// True when this answer closed the barrier and the walk advanced.
    pub advanced: bool,
}

pub async fn handle_answer_submit(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, (StatusCode, String)> {
    let handle = state.registry.get(&session_id).map_err(error_response)?;
    let outcome = handle
        .submit(&req.participant_id, req.question, req.value)
        .await
        .map_err(error_response)?;

    let resp = match outcome {
        SubmitOutcome::Recorded { advanced } => SubmitResponse {
            recorded: true,
            duplicate: false,
            advanced,
        },
        SubmitOutcome::Duplicate => SubmitResponse {
            recorded: false,
            duplicate: true,
            advanced: false,
        },
    };
    Ok(Json(resp))
}
