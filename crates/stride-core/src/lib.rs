//! stride-core — shared types, error taxonomy, question decks, and config.
//! All other Stride crates depend on this one.

pub mod config;
pub mod deck;
pub mod error;
pub mod position;
pub mod types;

pub use deck::QuestionDeck;
pub use error::SessionError;
pub use types::{AnswerValue, ParticipantView, RankEntry, SessionState, Snapshot};
