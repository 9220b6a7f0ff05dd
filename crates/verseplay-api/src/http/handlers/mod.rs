//! HTTP request handlers, one module per game.

pub mod quiz;
pub mod recitation;
pub mod wordchain;
