//! Recitation session lifecycle over the corpus backend.

use uuid::Uuid;

use verseplay_types::error::GameError;
use verseplay_types::report::{RecitationCreated, RecitationReport};

use crate::corpus::CorpusProvider;
use crate::recitation::scorer::{RecitationScorer, RecitationSession};
use crate::registry::SessionRegistry;

/// Poem recitation service.
pub struct RecitationService<C> {
    registry: SessionRegistry<RecitationSession>,
    corpus: C,
    poem_limit: u32,
}

impl<C: CorpusProvider> RecitationService<C> {
    pub fn new(corpus: C, poem_limit: u32) -> Self {
        Self {
            registry: SessionRegistry::new(),
            corpus,
            poem_limit,
        }
    }

    /// Load the poem set (ordered by id) and open a session.
    pub async fn create(&self) -> Result<RecitationCreated, GameError> {
        let poems = self.corpus.poems_ordered_by_id(self.poem_limit).await?;
        if poems.is_empty() {
            return Err(GameError::Internal("no poems available".to_string()));
        }

        let first = poems[0].clone();
        let total = poems.len() as u32;
        let session_id = self.registry.insert(RecitationSession::new(poems));
        tracing::info!(%session_id, total, "recitation session created");

        Ok(RecitationCreated {
            session_id,
            poem: first,
            poem_number: 1,
            total_poems: total,
        })
    }

    /// Score a recitation for the current (or an explicitly chosen) poem.
    pub async fn submit(
        &self,
        session_id: &Uuid,
        index: Option<usize>,
        text: &str,
    ) -> Result<RecitationReport, GameError> {
        self.registry
            .with_session(session_id, |session| {
                RecitationScorer::submit(session, index, text)
            })
            .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use verseplay_types::corpus::{GridQuestion, Poem};
    use verseplay_types::error::CorpusError;

    struct TwoPoemCorpus;

    impl CorpusProvider for TwoPoemCorpus {
        async fn lines_containing(&self, _keyword: &str) -> Result<Vec<String>, CorpusError> {
            Ok(Vec::new())
        }

        async fn poems_ordered_by_id(&self, limit: u32) -> Result<Vec<Poem>, CorpusError> {
            let poems = vec![
                Poem::new(
                    1,
                    "静夜思".to_string(),
                    "李白".to_string(),
                    vec!["床前明月光，".to_string(), "疑是地上霜。".to_string()],
                ),
                Poem::new(
                    2,
                    "春晓".to_string(),
                    "孟浩然".to_string(),
                    vec!["春眠不觉晓，".to_string(), "处处闻啼鸟。".to_string()],
                ),
            ];
            Ok(poems.into_iter().take(limit as usize).collect())
        }

        async fn grid_questions(&self) -> Result<Vec<GridQuestion>, CorpusError> {
            Ok(Vec::new())
        }
    }

    struct EmptyCorpus;

    impl CorpusProvider for EmptyCorpus {
        async fn lines_containing(&self, _keyword: &str) -> Result<Vec<String>, CorpusError> {
            Ok(Vec::new())
        }

        async fn poems_ordered_by_id(&self, _limit: u32) -> Result<Vec<Poem>, CorpusError> {
            Ok(Vec::new())
        }

        async fn grid_questions(&self) -> Result<Vec<GridQuestion>, CorpusError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn create_and_score_perfect_recitation() {
        let svc = RecitationService::new(TwoPoemCorpus, 40);
        let created = svc.create().await.unwrap();
        assert_eq!(created.poem.title, "静夜思");
        assert_eq!(created.total_poems, 2);

        let report = svc
            .submit(&created.session_id, None, "床前明月光疑是地上霜")
            .await
            .unwrap();
        assert_eq!(report.score, 5);
        assert_eq!(report.accuracy, 100.0);
    }

    #[tokio::test]
    async fn poem_limit_caps_the_session() {
        let svc = RecitationService::new(TwoPoemCorpus, 1);
        let created = svc.create().await.unwrap();
        assert_eq!(created.total_poems, 1);
    }

    #[tokio::test]
    async fn empty_corpus_is_an_internal_error() {
        let svc = RecitationService::new(EmptyCorpus, 40);
        assert!(matches!(svc.create().await, Err(GameError::Internal(_))));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let svc = RecitationService::new(TwoPoemCorpus, 40);
        let result = svc.submit(&Uuid::now_v7(), None, "床前明月光").await;
        assert!(matches!(result, Err(GameError::SessionNotFound)));
    }
}
