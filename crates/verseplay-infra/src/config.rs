//! Configuration loader.
//!
//! Reads `config.toml` from the given path and deserializes it into
//! [`AppConfig`]. Falls back to defaults when the file is missing or
//! malformed, so the server always starts (generation simply fails
//! over to the corpus ladder until credentials are supplied).

use std::path::Path;

use verseplay_types::config::AppConfig;

/// Load application configuration from a TOML file.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
pub async fn load_config(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}
