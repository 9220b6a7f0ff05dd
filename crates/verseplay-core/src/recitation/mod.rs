//! Poem recitation scoring.
//!
//! Compares a recalled text against a reference poem by normalized edit
//! distance and maps the accuracy to a 1..=5 band. Results are upserted
//! per poem, so a re-recitation replaces the earlier score.

pub mod distance;
pub mod scorer;
pub mod service;

pub use scorer::{RecitationResult, RecitationScorer, RecitationSession};
pub use service::RecitationService;
