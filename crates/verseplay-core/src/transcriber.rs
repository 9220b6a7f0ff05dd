//! Transcriber trait definition.
//!
//! Speech-to-text for the audio submission paths. Recognition failure
//! is a distinguished error the caller surfaces as-is -- there is no
//! fallback for a failed transcription, unlike generation.

use verseplay_types::error::TranscribeError;

/// Speech-to-text over raw audio bytes (16 kHz mono WAV).
pub trait Transcriber: Send + Sync {
    fn transcribe(
        &self,
        audio: &[u8],
    ) -> impl std::future::Future<Output = Result<String, TranscribeError>> + Send;
}
