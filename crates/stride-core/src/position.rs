//! Position calculator.
//!
//! Pure and deterministic — a participant's position depends only on their
//! own answer history, never on anyone else's. Each answer moves one unit
//! step along the agree/disagree axis; only relative ordering is displayed,
//! so the unit is 1.

use crate::types::AnswerValue;

/// Step contributed by a single answer.
pub const STEP: i32 = 1;

/// Compute the position after one accepted answer.
pub fn next_position(position: i32, value: AnswerValue) -> i32 {
    match value {
        AnswerValue::Agree => position + STEP,
        AnswerValue::Disagree => position - STEP,
    }
}
