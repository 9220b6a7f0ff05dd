//! Level progression for the word-chain game.
//!
//! A submission counts toward the level only when both the user's line
//! and the assistant's line contain the keyword. Three corrects clear
//! the level; clearing the last level completes the game. Completion is
//! a first-class outcome, not an optionally-present flag.

use tracing::info;

use crate::wordchain::session::WordChainSession;
use crate::wordchain::{ANSWERS_PER_LEVEL, MAX_LEVEL};

/// Outcome of recording one correct exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressOutcome {
    /// The level continues; the keyword is unchanged.
    Continue,
    /// The level was cleared; a new keyword was rotated in.
    LevelUp { new_keyword: String },
    /// The final level was cleared; no more keywords are issued.
    Completed,
}

/// Applies level-up and completion rules to a session.
#[derive(Debug, Clone)]
pub struct LevelProgression {
    answers_per_level: u32,
    max_level: u32,
}

impl Default for LevelProgression {
    fn default() -> Self {
        Self {
            answers_per_level: ANSWERS_PER_LEVEL,
            max_level: MAX_LEVEL,
        }
    }
}

impl LevelProgression {
    pub fn new(answers_per_level: u32, max_level: u32) -> Self {
        debug_assert!(answers_per_level >= 1 && max_level >= 1);
        Self {
            answers_per_level,
            max_level,
        }
    }

    pub fn answers_per_level(&self) -> u32 {
        self.answers_per_level
    }

    /// Record a correct exchange and decide the transition.
    ///
    /// The counter resets on every level clear, including the final one,
    /// so `correct_answers` stays within `0..answers_per_level`.
    pub fn record_correct(&self, session: &mut WordChainSession) -> ProgressOutcome {
        session.correct_answers += 1;
        if session.correct_answers < self.answers_per_level {
            return ProgressOutcome::Continue;
        }

        session.correct_answers = 0;
        if session.level + 1 > self.max_level {
            session.level = self.max_level + 1;
            info!(level = self.max_level, "final level cleared, game completed");
            return ProgressOutcome::Completed;
        }

        session.level += 1;
        let new_keyword = session.rotation.next();
        session.current_keyword = new_keyword.clone();
        info!(level = session.level, keyword = %new_keyword, "level up");
        ProgressOutcome::LevelUp { new_keyword }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> WordChainSession {
        WordChainSession::new(
            ["月", "花", "山", "水", "树", "风"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    #[test]
    fn counter_advances_without_level_change() {
        let progression = LevelProgression::default();
        let mut s = session();

        assert_eq!(progression.record_correct(&mut s), ProgressOutcome::Continue);
        assert_eq!(progression.record_correct(&mut s), ProgressOutcome::Continue);
        assert_eq!(s.level, 1);
        assert_eq!(s.correct_answers, 2);
    }

    #[test]
    fn third_correct_levels_up_and_rotates_keyword() {
        let progression = LevelProgression::default();
        let mut s = session();
        let first_keyword = s.current_keyword.clone();

        progression.record_correct(&mut s);
        progression.record_correct(&mut s);
        let outcome = progression.record_correct(&mut s);

        match outcome {
            ProgressOutcome::LevelUp { new_keyword } => {
                assert_eq!(new_keyword, s.current_keyword);
                assert_ne!(new_keyword, first_keyword);
            }
            other => panic!("expected LevelUp, got {other:?}"),
        }
        assert_eq!(s.level, 2);
        assert_eq!(s.correct_answers, 0);
    }

    #[test]
    fn clearing_final_level_completes_the_game() {
        let progression = LevelProgression::default();
        let mut s = session();

        let mut outcomes = Vec::new();
        for _ in 0..(ANSWERS_PER_LEVEL * MAX_LEVEL) {
            outcomes.push(progression.record_correct(&mut s));
        }

        assert_eq!(outcomes.last(), Some(&ProgressOutcome::Completed));
        assert!(s.is_completed());
        assert_eq!(s.display_level(), MAX_LEVEL);
        assert_eq!(s.correct_answers, 0);
    }

    #[test]
    fn invariants_hold_after_every_step() {
        let progression = LevelProgression::default();
        let mut s = session();

        for _ in 0..(ANSWERS_PER_LEVEL * MAX_LEVEL) {
            progression.record_correct(&mut s);
            assert!(s.correct_answers < ANSWERS_PER_LEVEL);
            assert!(s.level >= 1 && s.level <= MAX_LEVEL + 1);
        }
    }
}
