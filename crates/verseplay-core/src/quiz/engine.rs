//! Quiz session state and answer judging.

use serde::{Deserialize, Serialize};

use verseplay_types::corpus::GridQuestion;
use verseplay_types::error::GameError;
use verseplay_types::report::{QuizQuestionView, QuizReport};

/// Mutable state of one quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    /// Questions in play order (shuffled at creation).
    pub questions: Vec<GridQuestion>,
    pub current_index: usize,
    /// Per-question first-correct flags, same length as `questions`.
    pub completed: Vec<bool>,
    pub score: u32,
}

impl QuizSession {
    pub fn new(questions: Vec<GridQuestion>) -> Self {
        let completed = vec![false; questions.len()];
        Self {
            questions,
            current_index: 0,
            completed,
            score: 0,
        }
    }

    /// All questions with answers stripped and completion flagged.
    pub fn question_views(&self) -> Vec<QuizQuestionView> {
        self.questions
            .iter()
            .zip(&self.completed)
            .map(|(q, done)| QuizQuestionView {
                grid: q.grid.clone(),
                is_completed: *done,
            })
            .collect()
    }
}

/// Judges answers against a quiz session.
pub struct QuizEngine;

impl QuizEngine {
    /// Judge a submission against the question at `index` (or the
    /// session's current question when absent).
    ///
    /// An explicit index also repositions the session, so the client
    /// drives navigation. Out-of-range indices are a validation error
    /// and leave the session untouched.
    pub fn submit(
        session: &mut QuizSession,
        index: Option<usize>,
        answer: &str,
    ) -> Result<QuizReport, GameError> {
        let total = session.questions.len();
        let idx = index.unwrap_or(session.current_index);
        if idx >= total {
            return Err(GameError::Validation(format!(
                "question index {idx} out of range 0..{total}"
            )));
        }
        if index.is_some() {
            session.current_index = idx;
        }

        let question = session.questions[idx].clone();
        let is_correct = answer.trim() == question.answer.trim();

        // Score at most once per question, on the first correct answer.
        if is_correct && !session.completed[idx] {
            session.score += 1;
            session.completed[idx] = true;
            tracing::info!(index = idx, score = session.score, "quiz question completed");
        }

        Ok(QuizReport {
            is_correct,
            correct_answer: question.answer.clone(),
            submitted_text: answer.to_string(),
            score: session.score,
            current_index: idx as u32,
            question_number: idx as u32 + 1,
            total_questions: total as u32,
            all_questions: session.question_views(),
            current_question: question,
            recognized_text: None,
        })
    }
}
