//! Quiz session lifecycle over the corpus backend.

use rand::seq::SliceRandom;
use uuid::Uuid;

use verseplay_types::error::GameError;
use verseplay_types::report::{QuizCreated, QuizQuestionView, QuizReport};

use crate::corpus::CorpusProvider;
use crate::quiz::engine::{QuizEngine, QuizSession};
use crate::registry::SessionRegistry;

/// Nine-grid quiz service.
pub struct QuizService<C> {
    registry: SessionRegistry<QuizSession>,
    corpus: C,
}

impl<C: CorpusProvider> QuizService<C> {
    pub fn new(corpus: C) -> Self {
        Self {
            registry: SessionRegistry::new(),
            corpus,
        }
    }

    /// Load questions, shuffle them, and open a session.
    pub async fn create(&self) -> Result<QuizCreated, GameError> {
        let mut questions = self.corpus.grid_questions().await?;
        if questions.is_empty() {
            return Err(GameError::Internal(
                "no grid questions available".to_string(),
            ));
        }
        questions.shuffle(&mut rand::thread_rng());

        let total = questions.len() as u32;
        let first = QuizQuestionView {
            grid: questions[0].grid.clone(),
            is_completed: false,
        };
        let session_id = self.registry.insert(QuizSession::new(questions));
        tracing::info!(%session_id, total, "quiz session created");

        Ok(QuizCreated {
            session_id,
            question: first,
            question_number: 1,
            total_questions: total,
            score: 0,
        })
    }

    /// Judge an answer for the current (or an explicitly chosen) question.
    pub async fn submit(
        &self,
        session_id: &Uuid,
        index: Option<usize>,
        answer: &str,
    ) -> Result<QuizReport, GameError> {
        self.registry
            .with_session(session_id, |session| {
                QuizEngine::submit(session, index, answer)
            })
            .await?
    }
}
