//! Word-chain session state.

use serde::{Deserialize, Serialize};

use verseplay_types::dialogue::DialogueTurn;

use crate::wordchain::rotation::KeywordRotation;
use crate::wordchain::MAX_LEVEL;

/// Mutable state of one word-chain game.
///
/// Invariants, held after every submission:
/// - `level` is in `1..=MAX_LEVEL + 1`, where `MAX_LEVEL + 1` marks a
///   completed game;
/// - `correct_answers` is in `0..ANSWERS_PER_LEVEL`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordChainSession {
    pub rotation: KeywordRotation,
    pub current_keyword: String,
    pub level: u32,
    pub correct_answers: u32,
    /// Full dialogue, oldest first. Both roles feed duplicate detection.
    pub dialogues: Vec<DialogueTurn>,
}

impl WordChainSession {
    /// Start a session over the given pool, drawing the first keyword.
    pub fn new(pool: Vec<String>) -> Self {
        let mut rotation = KeywordRotation::new(pool);
        let current_keyword = rotation.next();
        Self {
            rotation,
            current_keyword,
            level: 1,
            correct_answers: 0,
            dialogues: Vec::new(),
        }
    }

    /// Whether every level has been cleared.
    pub fn is_completed(&self) -> bool {
        self.level > MAX_LEVEL
    }

    /// The level to display: completed games report the final level.
    pub fn display_level(&self) -> u32 {
        self.level.min(MAX_LEVEL)
    }

    /// All dialogue lines, for duplicate checks.
    pub fn history_lines(&self) -> Vec<&str> {
        self.dialogues.iter().map(|t| t.content.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_draws_first_keyword() {
        let session = WordChainSession::new(vec!["月".to_string(), "花".to_string()]);
        assert_eq!(session.current_keyword, "月");
        assert_eq!(session.level, 1);
        assert_eq!(session.correct_answers, 0);
        assert!(!session.is_completed());
    }

    #[test]
    fn completed_marker_is_one_past_max() {
        let mut session = WordChainSession::new(vec!["月".to_string()]);
        session.level = MAX_LEVEL + 1;
        assert!(session.is_completed());
        assert_eq!(session.display_level(), MAX_LEVEL);
    }
}
