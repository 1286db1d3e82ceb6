//! Error taxonomy for session operations.
//!
//! Every variant is local to one session's handling of one event — none of
//! them may take down the registry or another session. Duplicate answer
//! submission is deliberately NOT here: it is an idempotent outcome, not an
//! error (clients retry; retries must not be punished).

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session not found")]
    SessionNotFound,

    #[error("participant not found in session")]
    UnknownParticipant,

    /// The action is not legal in the session's current state. The client
    /// should re-sync from the next snapshot.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// Bookkeeping broke an internal invariant (e.g. more answers than
    /// roster members). Logged at error level by the engine — a desync here
    /// corrupts every client's displayed state.
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}
