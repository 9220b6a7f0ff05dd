//! Flat response payloads returned by the game services.
//!
//! Each entity has an explicit serde contract here rather than being
//! re-encoded from engine state at the edge. The HTTP layer wraps these
//! in the response envelope untouched.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::corpus::{GridQuestion, Poem};

// ---------------------------------------------------------------------------
// Word-chain
// ---------------------------------------------------------------------------

/// Outcome class of a word-chain submission.
///
/// `Failed` means the user's line did not contain the keyword;
/// `AiFailed` means the user's line was valid but no keyword-bearing
/// reply could be produced, so the counter did not advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordChainStatus {
    Success,
    AiFailed,
    Failed,
}

/// Response to creating a word-chain session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordChainCreated {
    pub session_id: Uuid,
    pub level: u32,
    pub keyword: String,
    pub answers_per_level: u32,
    pub max_level: u32,
}

/// Response to a word-chain submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordChainReport {
    pub status: WordChainStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The assistant's reply line, absent when the submission was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_response: Option<String>,
    pub level: u32,
    /// The keyword the submission was judged against.
    pub keyword: String,
    pub correct_answers: u32,
    pub required_answers: u32,
    pub level_changed: bool,
    /// Set when a level-up rotated in a new keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_keyword: Option<String>,
    pub game_completed: bool,
    /// Transcription result, present on the audio submission path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recognized_text: Option<String>,
}

// ---------------------------------------------------------------------------
// Nine-grid quiz
// ---------------------------------------------------------------------------

/// A question as shown to the player: answer stripped, completion flagged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestionView {
    pub grid: [[String; 3]; 3],
    pub is_completed: bool,
}

/// Response to creating a quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizCreated {
    pub session_id: Uuid,
    pub question: QuizQuestionView,
    pub question_number: u32,
    pub total_questions: u32,
    pub score: u32,
}

/// Response to a quiz submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    pub is_correct: bool,
    pub correct_answer: String,
    pub submitted_text: String,
    pub score: u32,
    pub current_index: u32,
    pub question_number: u32,
    pub total_questions: u32,
    pub all_questions: Vec<QuizQuestionView>,
    /// The judged question in full, reference answer included.
    pub current_question: GridQuestion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recognized_text: Option<String>,
}

// ---------------------------------------------------------------------------
// Recitation
// ---------------------------------------------------------------------------

/// Per-poem progress line in a recitation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoemSummary {
    pub poem_id: i64,
    pub title: String,
    pub author: String,
    pub is_completed: bool,
    pub score: u32,
}

/// Response to creating a recitation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecitationCreated {
    pub session_id: Uuid,
    pub poem: Poem,
    pub poem_number: u32,
    pub total_poems: u32,
}

/// Response to a recitation submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecitationReport {
    /// Band score, 1..=5.
    pub score: u32,
    /// Accuracy as a percentage, rounded to 2 decimals.
    pub accuracy: f64,
    pub feedback: String,
    pub reference_text: String,
    pub recitation_text: String,
    pub poem_number: u32,
    pub total_poems: u32,
    pub current_index: u32,
    pub current_poem: Poem,
    pub all_poems: Vec<PoemSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recognized_text: Option<String>,
}
