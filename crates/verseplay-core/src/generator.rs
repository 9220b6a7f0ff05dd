//! LineGenerator trait definition.
//!
//! Abstraction over the chat-completion backend that proposes reply
//! lines for the word-chain game. Uses native async fn in traits
//! (RPITIT); the concrete implementation lives in verseplay-infra.

use verseplay_types::dialogue::DialogueTurn;
use verseplay_types::error::GeneratorError;

/// A chat-style text completion backend.
///
/// `system` carries the generation instruction; `history` is the
/// session's dialogue so far, oldest first. Implementations must not
/// mutate or reorder the history.
pub trait LineGenerator: Send + Sync {
    fn complete(
        &self,
        system: &str,
        history: &[DialogueTurn],
    ) -> impl std::future::Future<Output = Result<String, GeneratorError>> + Send;
}
