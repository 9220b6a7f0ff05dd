use thiserror::Error;

/// Errors surfaced by the game-session engines.
///
/// Every variant is returned as a value; the engines never panic on bad
/// input. Generation exhaustion is deliberately absent -- the fallback
/// ladder always produces displayable text.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("session not found")]
    SessionNotFound,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("upstream service error: {0}")]
    Upstream(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors from the speech-to-text collaborator.
///
/// `RecognitionFailed` is a distinguished outcome, not a transport
/// failure: the audio reached the recognizer but produced no usable
/// text. Callers surface it and prompt for a text resubmission; there
/// is no fallback on this path.
#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("speech recognition failed")]
    RecognitionFailed,

    #[error("transcriber request error: {0}")]
    Request(String),
}

/// Errors from the chat-completion generator.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("generator request error: {0}")]
    Request(String),

    #[error("malformed generator response: {0}")]
    InvalidResponse(String),
}

/// Errors from corpus lookups (used by trait definitions in verseplay-core).
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus connection error")]
    Connection,

    #[error("corpus query error: {0}")]
    Query(String),
}

impl From<CorpusError> for GameError {
    fn from(e: CorpusError) -> Self {
        GameError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_display() {
        let err = GameError::Validation("missing session id".to_string());
        assert_eq!(err.to_string(), "validation error: missing session id");
    }

    #[test]
    fn test_transcribe_error_display() {
        assert_eq!(
            TranscribeError::RecognitionFailed.to_string(),
            "speech recognition failed"
        );
    }

    #[test]
    fn test_corpus_error_converts_to_internal() {
        let err: GameError = CorpusError::Query("no such table".to_string()).into();
        assert!(matches!(err, GameError::Internal(_)));
        assert!(err.to_string().contains("no such table"));
    }
}
