//! OpenAI-compatible chat-completion generator.
//!
//! Posts to `{base_url}/chat/completions`; the original deployment
//! targets DeepSeek, but any OpenAI-compatible endpoint works. The
//! request carries the rotation instruction as the system message and
//! the session dialogue as history.
//!
//! # API Key Security
//!
//! The key is held in a [`SecretString`] and only exposed when building
//! the Authorization header. The struct deliberately does not derive
//! Debug.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use verseplay_core::generator::LineGenerator;
use verseplay_types::config::GeneratorConfig;
use verseplay_types::dialogue::DialogueTurn;
use verseplay_types::error::GeneratorError;

/// Sampling temperature used for line generation.
const TEMPERATURE: f64 = 0.7;

/// Nucleus sampling cutoff.
const TOP_P: f64 = 0.8;

/// Chat-completion backend for the word-chain generator.
pub struct ChatCompletionGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: SecretString,
}

impl ChatCompletionGenerator {
    /// Build a generator from configuration.
    ///
    /// The per-call timeout is enforced by the HTTP client; expiry
    /// surfaces as a request error and counts as a failed attempt in
    /// the retry policy.
    pub fn new(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeneratorError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: SecretString::from(config.api_key.clone()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl LineGenerator for ChatCompletionGenerator {
    async fn complete(
        &self,
        system: &str,
        history: &[DialogueTurn],
    ) -> Result<String, GeneratorError> {
        let mut messages = vec![json!({ "role": "system", "content": system })];
        for turn in history {
            messages.push(json!({
                "role": turn.role.to_string(),
                "content": turn.content,
            }));
        }

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&json!({
                "model": self.model,
                "messages": messages,
                "temperature": TEMPERATURE,
                "top_p": TOP_P,
            }))
            .send()
            .await
            .map_err(|e| GeneratorError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Request(format!(
                "completion endpoint returned {status}: {body}"
            )));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| GeneratorError::InvalidResponse("no choices in response".to_string()))?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parsing() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":" 海上生明月 "}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, " 海上生明月 ");
    }

    #[test]
    fn builder_strips_trailing_slash() {
        let generator = ChatCompletionGenerator::new(&GeneratorConfig {
            base_url: "https://api.deepseek.com/".to_string(),
            ..GeneratorConfig::default()
        })
        .unwrap();
        assert_eq!(generator.base_url, "https://api.deepseek.com");
    }
}
