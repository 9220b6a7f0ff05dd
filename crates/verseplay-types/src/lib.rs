//! Shared domain types for Verseplay.
//!
//! This crate holds the data shapes exchanged between the game engines,
//! the upstream collaborators, and the HTTP layer. No business logic
//! lives here beyond Display/FromStr/serde plumbing.

pub mod config;
pub mod corpus;
pub mod dialogue;
pub mod error;
pub mod report;
