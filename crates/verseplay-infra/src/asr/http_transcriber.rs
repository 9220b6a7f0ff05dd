//! HTTP speech recognizer (Baidu-style short-speech API).
//!
//! Two round trips per call: an OAuth token exchange against
//! `token_url`, then a recognition POST of base64 WAV audio against
//! `recognize_url`. Recognition failures (bad audio, silence, upstream
//! `err_no`) are distinguished from transport errors so callers can
//! tell the user to retry or type instead.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use verseplay_core::transcriber::Transcriber;
use verseplay_types::config::TranscriberConfig;
use verseplay_types::error::TranscribeError;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Mandarin model id for the short-speech pro endpoint.
const DEV_PID: u32 = 80001;

/// Expected input audio sample rate.
const SAMPLE_RATE: u32 = 16_000;

/// Speech recognizer over a Baidu-style short-speech HTTP API.
pub struct HttpTranscriber {
    client: reqwest::Client,
    token_url: String,
    recognize_url: String,
    api_key: String,
    secret_key: SecretString,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    err_no: i64,
    #[serde(default)]
    err_msg: String,
    #[serde(default)]
    result: Vec<String>,
}

impl HttpTranscriber {
    pub fn new(config: &TranscriberConfig) -> Result<Self, TranscribeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranscribeError::Request(e.to_string()))?;

        Ok(Self {
            client,
            token_url: config.token_url.clone(),
            recognize_url: config.recognize_url.clone(),
            api_key: config.api_key.clone(),
            secret_key: SecretString::from(config.secret_key.clone()),
        })
    }

    /// Exchange the API key pair for a short-lived access token.
    ///
    /// Tokens are valid for ~30 days upstream; requesting one per call
    /// keeps the recognizer stateless at the cost of an extra round
    /// trip.
    async fn fetch_token(&self) -> Result<String, TranscribeError> {
        let response = self
            .client
            .post(&self.token_url)
            .query(&[
                ("grant_type", "client_credentials"),
                ("client_id", &self.api_key),
                ("client_secret", self.secret_key.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| TranscribeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranscribeError::Request(format!(
                "token endpoint returned {status}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::Request(e.to_string()))?;
        Ok(token.access_token)
    }
}

impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscribeError> {
        if audio.is_empty() {
            return Err(TranscribeError::RecognitionFailed);
        }

        let token = self.fetch_token().await?;
        let speech = BASE64.encode(audio);

        let response = self
            .client
            .post(&self.recognize_url)
            .json(&json!({
                "format": "wav",
                "rate": SAMPLE_RATE,
                "channel": 1,
                "cuid": "verseplay",
                "dev_pid": DEV_PID,
                "token": token,
                "speech": speech,
                "len": audio.len(),
            }))
            .send()
            .await
            .map_err(|e| TranscribeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranscribeError::Request(format!(
                "recognize endpoint returned {status}"
            )));
        }

        let parsed: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::Request(e.to_string()))?;

        if parsed.err_no != 0 {
            tracing::warn!(
                err_no = parsed.err_no,
                err_msg = %parsed.err_msg,
                "speech recognition rejected audio"
            );
            return Err(TranscribeError::RecognitionFailed);
        }

        match parsed.result.into_iter().next() {
            Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            _ => Err(TranscribeError::RecognitionFailed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognize_response_success_parses() {
        let raw = r#"{"err_no":0,"err_msg":"success.","result":["床前明月光"]}"#;
        let parsed: RecognizeResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.err_no, 0);
        assert_eq!(parsed.result, vec!["床前明月光".to_string()]);
    }

    #[test]
    fn recognize_response_error_parses_without_result() {
        let raw = r#"{"err_no":3301,"err_msg":"speech quality error."}"#;
        let parsed: RecognizeResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.err_no, 3301);
        assert!(parsed.result.is_empty());
    }

    #[tokio::test]
    async fn empty_audio_is_a_recognition_failure() {
        let transcriber = HttpTranscriber::new(&TranscriberConfig::default()).unwrap();
        let err = transcriber.transcribe(&[]).await.unwrap_err();
        assert!(matches!(err, TranscribeError::RecognitionFailed));
    }
}
