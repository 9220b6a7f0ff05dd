//! Infrastructure implementations for Verseplay.
//!
//! Concrete backends for the collaborator traits in verseplay-core:
//! the SQLite corpus repository, the OpenAI-compatible chat-completion
//! generator, and the HTTP speech transcriber, plus the `config.toml`
//! loader.

pub mod asr;
pub mod config;
pub mod llm;
pub mod sqlite;
