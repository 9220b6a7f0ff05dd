//! Recitation session state, accuracy computation, and score bands.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use verseplay_types::corpus::Poem;
use verseplay_types::error::GameError;
use verseplay_types::report::{PoemSummary, RecitationReport};

use crate::recitation::distance::levenshtein;

/// Last recorded result for one poem, replaced on resubmission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RecitationResult {
    pub score: u32,
    pub accuracy: f64,
}

/// Mutable state of one recitation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecitationSession {
    pub poems: Vec<Poem>,
    pub current_index: usize,
    /// Poem index to last result. Upserted, never appended.
    pub results: HashMap<usize, RecitationResult>,
}

impl RecitationSession {
    pub fn new(poems: Vec<Poem>) -> Self {
        Self {
            poems,
            current_index: 0,
            results: HashMap::new(),
        }
    }

    fn summaries(&self) -> Vec<PoemSummary> {
        self.poems
            .iter()
            .enumerate()
            .map(|(idx, poem)| {
                let result = self.results.get(&idx);
                PoemSummary {
                    poem_id: poem.id,
                    title: poem.title.clone(),
                    author: poem.author.clone(),
                    is_completed: result.is_some(),
                    score: result.map(|r| r.score).unwrap_or(0),
                }
            })
            .collect()
    }
}

/// Scores recitations against reference poems.
pub struct RecitationScorer;

impl RecitationScorer {
    /// Strip everything except CJK ideographs, Latin letters, digits,
    /// and whitespace. Punctuation never counts against the reciter.
    pub fn normalize(text: &str) -> String {
        text.chars()
            .filter(|c| {
                ('\u{4e00}'..='\u{9fff}').contains(c)
                    || c.is_ascii_alphanumeric()
                    || c.is_whitespace()
            })
            .collect()
    }

    /// Accuracy of `submitted` against `reference`, both already
    /// normalized. Zero when the reference is empty.
    pub fn accuracy(submitted: &str, reference: &str) -> f64 {
        let reference_len = reference.chars().count();
        if reference_len == 0 {
            return 0.0;
        }
        let distance = levenshtein(submitted, reference);
        (1.0 - distance as f64 / reference_len as f64).max(0.0)
    }

    /// Map an accuracy to its score band and feedback line.
    ///
    /// Band boundaries are closed on the lower end: exactly 0.95 is a 5.
    pub fn band(accuracy: f64) -> (u32, &'static str) {
        if accuracy >= 0.95 {
            (5, "优秀！背诵非常精确。")
        } else if accuracy >= 0.90 {
            (4, "很好！有少量小错误。")
        } else if accuracy >= 0.80 {
            (3, "良好。存在一些错误，但整体不错。")
        } else if accuracy >= 0.60 {
            (2, "需要改进。存在较多错误。")
        } else {
            (1, "需要重新背诵。与原文相差较大。")
        }
    }

    /// Score a recitation against the poem at `index` (or the current
    /// poem), upserting the result and repositioning on an explicit
    /// index.
    pub fn submit(
        session: &mut RecitationSession,
        index: Option<usize>,
        submitted: &str,
    ) -> Result<RecitationReport, GameError> {
        let total = session.poems.len();
        let idx = index.unwrap_or(session.current_index);
        if idx >= total {
            return Err(GameError::Validation(format!(
                "poem index {idx} out of range 0..{total}"
            )));
        }
        if index.is_some() {
            session.current_index = idx;
        }

        let poem = session.poems[idx].clone();
        let clean_submitted = Self::normalize(submitted);
        let clean_reference = Self::normalize(&poem.full_text);
        let accuracy = Self::accuracy(&clean_submitted, &clean_reference);
        let (score, feedback) = Self::band(accuracy);

        session
            .results
            .insert(idx, RecitationResult { score, accuracy });
        tracing::info!(index = idx, score, accuracy, "recitation scored");

        Ok(RecitationReport {
            score,
            accuracy: (accuracy * 10000.0).round() / 100.0,
            feedback: feedback.to_string(),
            reference_text: poem.full_text.clone(),
            recitation_text: submitted.to_string(),
            poem_number: idx as u32 + 1,
            total_poems: total as u32,
            current_index: idx as u32,
            current_poem: poem,
            all_poems: session.summaries(),
            recognized_text: None,
        })
    }
}
