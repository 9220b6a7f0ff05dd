//! Application state wiring all services together.
//!
//! Services are generic over the generator/corpus/transcriber traits,
//! but AppState pins them to the concrete infra implementations.

use std::sync::Arc;

use verseplay_core::quiz::QuizService;
use verseplay_core::recitation::RecitationService;
use verseplay_core::wordchain::WordChainService;
use verseplay_infra::asr::HttpTranscriber;
use verseplay_infra::llm::ChatCompletionGenerator;
use verseplay_infra::sqlite::{CorpusPool, SqliteCorpusRepository};
use verseplay_types::config::AppConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteWordChainService =
    WordChainService<ChatCompletionGenerator, SqliteCorpusRepository>;

pub type ConcreteQuizService = QuizService<SqliteCorpusRepository>;

pub type ConcreteRecitationService = RecitationService<SqliteCorpusRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub wordchain: Arc<ConcreteWordChainService>,
    pub quiz: Arc<ConcreteQuizService>,
    pub recitation: Arc<ConcreteRecitationService>,
    pub transcriber: Arc<HttpTranscriber>,
}

impl AppState {
    /// Initialize the application state: connect to the corpus, wire services.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = CorpusPool::connect(&config.database_url).await?;

        let generator = ChatCompletionGenerator::new(&config.generator)?;
        let transcriber = HttpTranscriber::new(&config.transcriber)?;

        let wordchain =
            WordChainService::new(generator, SqliteCorpusRepository::new(pool.clone()));
        let quiz = QuizService::new(SqliteCorpusRepository::new(pool.clone()));
        let recitation = RecitationService::new(
            SqliteCorpusRepository::new(pool),
            config.recitation_poem_limit,
        );

        Ok(Self {
            wordchain: Arc::new(wordchain),
            quiz: Arc::new(quiz),
            recitation: Arc::new(recitation),
            transcriber: Arc::new(transcriber),
        })
    }
}
