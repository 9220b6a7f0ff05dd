//! Application configuration deserialized from `config.toml`.
//!
//! Every field has a default so a missing or partial file still yields
//! a runnable configuration (upstream credentials excepted -- an empty
//! API key simply makes every generation attempt fail over to the
//! corpus ladder).

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Verseplay server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// SQLite corpus database URL (read-only).
    pub database_url: String,
    /// How many poems a recitation session loads, ordered by poem id.
    pub recitation_poem_limit: u32,
    pub generator: GeneratorConfig,
    pub transcriber: TranscriberConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            database_url: "sqlite://verseplay.db?mode=ro".to_string(),
            recitation_poem_limit: 40,
            generator: GeneratorConfig::default(),
            transcriber: TranscriberConfig::default(),
        }
    }
}

/// Chat-completion generator settings (OpenAI-compatible endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    /// Per-call timeout; expiry counts as a failed attempt.
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

/// Speech-recognition settings (Baidu-style short-speech API).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriberConfig {
    pub token_url: String,
    pub recognize_url: String,
    pub api_key: String,
    pub secret_key: String,
    pub timeout_secs: u64,
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            token_url: "https://aip.baidubce.com/oauth/2.0/token".to_string(),
            recognize_url: "https://vop.baidu.com/pro_api".to_string(),
            api_key: String::new(),
            secret_key: String::new(),
            timeout_secs: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.recitation_poem_limit, 40);
        assert_eq!(config.generator.model, "deepseek-chat");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
listen_addr = "127.0.0.1:9000"

[generator]
api_key = "sk-test"
"#,
        )
        .unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.generator.api_key, "sk-test");
        assert_eq!(config.generator.base_url, "https://api.deepseek.com");
        assert_eq!(config.recitation_poem_limit, 40);
    }
}
