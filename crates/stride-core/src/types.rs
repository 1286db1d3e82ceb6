//! Wire-visible session types.
//!
//! Everything a client sees crosses the boundary as one of these shapes.
//! Session state and answer values are tagged enums rather than free-form
//! strings so the gateway cannot hand the engine an illegal value.

use serde::{Deserialize, Serialize};

/// Lifecycle state of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Accepting joins, no answers yet.
    Waiting,
    /// A walk is running — the current question accepts answers.
    InProgress,
    /// All questions answered. Terminal for the walk, not the session.
    Completed,
}

/// A participant's response to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerValue {
    Agree,
    Disagree,
}

/// Full state of a session as broadcast to every subscriber.
///
/// `current_question` is `-1` while waiting, the question index while in
/// progress, and `total_questions` once completed — monotonic across a walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub session_id: String,
    pub name: String,
    pub state: SessionState,
    pub current_question: i64,
    /// Text of the open question. None unless in progress.
    pub question: Option<String>,
    pub total_questions: usize,
    /// Distinct participants who have answered the open question.
    pub answered_current: usize,
    pub participants: Vec<ParticipantView>,
    /// Final ranking, present only once the walk has completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranked_final: Option<Vec<RankEntry>>,
}

/// One roster member as seen in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantView {
    pub id: String,
    pub nickname: String,
    pub position: i32,
    pub answered_current: bool,
    pub connected: bool,
}

/// One row of the final ranking. Ties in position keep join order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankEntry {
    /// 1-based. Equal positions share a rank.
    pub rank: usize,
    pub id: String,
    pub nickname: String,
    pub position: i32,
}
