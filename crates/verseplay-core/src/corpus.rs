//! CorpusProvider trait definition.
//!
//! Read-only lookups into the pre-populated poem corpus. The SQLite
//! implementation lives in verseplay-infra; tests use in-memory fakes.

use verseplay_types::corpus::{GridQuestion, Poem};
use verseplay_types::error::CorpusError;

/// Read-only corpus lookups consumed by the game engines.
pub trait CorpusProvider: Send + Sync {
    /// All corpus lines containing `keyword` as a substring.
    fn lines_containing(
        &self,
        keyword: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, CorpusError>> + Send;

    /// The first `limit` poems ordered by poem id.
    fn poems_ordered_by_id(
        &self,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Poem>, CorpusError>> + Send;

    /// All nine-grid quiz questions.
    fn grid_questions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<GridQuestion>, CorpusError>> + Send;
}
