//! Keyword rotation with short-term no-repeat memory.
//!
//! The first pass walks the pool in order, so every keyword is shown
//! once before any repeat. After that, draws are uniform over the pool
//! minus a recency buffer of the last five picks. When the buffer swallows
//! the whole pool, it shrinks to its last two entries before redrawing,
//! which keeps the candidate set non-empty for any pool of three or more.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// How many recent picks are excluded from the random draw.
const RECENCY_LIMIT: usize = 5;

/// Buffer size after a shrink, when every pool member was recent.
const SHRINK_TO: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum Phase {
    Sequential,
    Randomized,
}

/// Supplies the next prompt keyword for a word-chain session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRotation {
    pool: Vec<String>,
    cursor: usize,
    recent: Vec<String>,
    phase: Phase,
}

impl KeywordRotation {
    /// Build a rotation over a non-empty pool.
    pub fn new(pool: Vec<String>) -> Self {
        debug_assert!(!pool.is_empty(), "keyword pool must be non-empty");
        Self {
            pool,
            cursor: 0,
            recent: Vec::new(),
            phase: Phase::Sequential,
        }
    }

    /// Draw the next keyword.
    pub fn next(&mut self) -> String {
        let keyword = match self.phase {
            Phase::Sequential => {
                let keyword = self.pool[self.cursor].clone();
                self.cursor += 1;
                if self.cursor >= self.pool.len() {
                    self.phase = Phase::Randomized;
                }
                keyword
            }
            Phase::Randomized => {
                let mut candidates: Vec<&String> = self
                    .pool
                    .iter()
                    .filter(|k| !self.recent.contains(k))
                    .collect();

                if candidates.is_empty() {
                    // The whole pool was recent; keep only the last two
                    // picks excluded so the draw cannot deadlock. Pools
                    // smaller than three keep even less.
                    let keep = SHRINK_TO.min(self.pool.len().saturating_sub(1));
                    let keep_from = self.recent.len().saturating_sub(keep);
                    self.recent.drain(..keep_from);
                    candidates = self
                        .pool
                        .iter()
                        .filter(|k| !self.recent.contains(k))
                        .collect();
                }

                (*candidates
                    .choose(&mut rand::thread_rng())
                    .expect("candidate set is non-empty after shrink"))
                .clone()
            }
        };

        self.remember(&keyword);
        tracing::debug!(keyword = %keyword, recent = ?self.recent, "keyword selected");
        keyword
    }

    /// Record a pick in the recency buffer, most recent last.
    fn remember(&mut self, keyword: &str) {
        if let Some(pos) = self.recent.iter().position(|k| k == keyword) {
            self.recent.remove(pos);
        }
        self.recent.push(keyword.to_string());
        if self.recent.len() > RECENCY_LIMIT {
            let excess = self.recent.len() - RECENCY_LIMIT;
            self.recent.drain(..excess);
        }
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pool(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_pass_returns_each_keyword_exactly_once() {
        for n in 1..=8 {
            let words: Vec<String> = (0..n).map(|i| format!("字{i}")).collect();
            let mut rotation = KeywordRotation::new(words.clone());
            let drawn: Vec<String> = (0..n).map(|_| rotation.next()).collect();
            assert_eq!(drawn, words, "sequential pass must preserve pool order");
        }
    }

    #[test]
    fn two_keyword_pool_scenario() {
        let mut rotation = KeywordRotation::new(pool(&["月", "花"]));
        assert_eq!(rotation.next(), "月");
        assert_eq!(rotation.next(), "花");
        let third = rotation.next();
        assert!(third == "月" || third == "花");
    }

    #[test]
    fn randomized_phase_avoids_recent_picks() {
        let words = pool(&["月", "花", "山", "水", "树", "风", "雨", "云"]);
        let mut rotation = KeywordRotation::new(words);
        for _ in 0..8 {
            rotation.next();
        }
        // Recency buffer holds the last five; the next draw must avoid them.
        let recent: Vec<String> = rotation.recent.clone();
        assert_eq!(recent.len(), 5);
        let next = rotation.next();
        assert!(!recent.contains(&next));
    }

    #[test]
    fn small_pool_never_deadlocks() {
        let mut rotation = KeywordRotation::new(pool(&["月", "花", "山"]));
        let mut seen = HashSet::new();
        for _ in 0..100 {
            seen.insert(rotation.next());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn recency_buffer_is_bounded() {
        let words: Vec<String> = (0..20).map(|i| format!("字{i}")).collect();
        let mut rotation = KeywordRotation::new(words);
        for _ in 0..60 {
            rotation.next();
            assert!(rotation.recent.len() <= RECENCY_LIMIT);
        }
    }

    #[test]
    fn repeat_pick_moves_to_back_of_buffer() {
        let mut rotation = KeywordRotation::new(pool(&["月", "花"]));
        rotation.remember("月");
        rotation.remember("花");
        rotation.remember("月");
        assert_eq!(rotation.recent, vec!["花".to_string(), "月".to_string()]);
    }
}
