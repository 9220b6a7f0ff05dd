//! Nine-grid quiz engine.
//!
//! A session holds a shuffled question set; each question is a 3x3
//! character grid with one reference answer. Scoring is strict
//! trim-equality and idempotent per question: resubmitting a correct
//! answer never double-counts.

pub mod engine;
pub mod service;

pub use engine::{QuizEngine, QuizSession};
pub use service::QuizService;
