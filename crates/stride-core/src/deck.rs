//! Question deck — the fixed ordered sequence of statements a walk runs
//! through.
//!
//! Loaded once at daemon startup from a JSON file shaped like
//! `{"questions": [{"text": "..."}]}`. Every session created afterwards
//! shares the same deck; the deck is immutable for the session's lifetime.

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, serde_json::Error),
    #[error("deck {0} contains no questions")]
    Empty(PathBuf),
}

#[derive(Debug, Deserialize)]
struct DeckFile {
    questions: Vec<DeckEntry>,
}

#[derive(Debug, Deserialize)]
struct DeckEntry {
    text: String,
}

/// An ordered, immutable sequence of question statements.
#[derive(Debug, Clone)]
pub struct QuestionDeck {
    statements: Vec<String>,
}

impl QuestionDeck {
    /// Load a deck from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DeckError::ReadFailed(path.to_path_buf(), e))?;
        let file: DeckFile = serde_json::from_str(&text)
            .map_err(|e| DeckError::ParseFailed(path.to_path_buf(), e))?;
        if file.questions.is_empty() {
            return Err(DeckError::Empty(path.to_path_buf()));
        }
        Ok(Self {
            statements: file.questions.into_iter().map(|q| q.text).collect(),
        })
    }

    /// The built-in fallback deck, used when no deck file exists.
    pub fn builtin() -> Self {
        Self {
            statements: [
                "I felt well prepared for this topic before today.",
                "I have applied this material outside the classroom.",
                "I can explain the core idea to someone who has never seen it.",
                "I had easy access to the resources this unit assumed.",
                "I have had a mentor or role model in this subject.",
                "I feel comfortable asking questions in front of the group.",
                "I have worked on a team project in this area before.",
                "I rarely needed extra time to keep up with the pace.",
                "I could study for this without outside obligations interfering.",
                "I see people with a background like mine succeeding in this field.",
                "I have presented work on this subject to an audience.",
                "I expect to keep using this subject after the course ends.",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
