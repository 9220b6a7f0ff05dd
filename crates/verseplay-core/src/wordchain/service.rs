//! Word-chain game orchestration.
//!
//! Ties the registry, validator, generation policy, and progression
//! together for the create/submit operations. The session lock is held
//! across the generator call, so concurrent submissions to the same
//! session are serialized end to end.

use uuid::Uuid;

use verseplay_types::dialogue::DialogueTurn;
use verseplay_types::error::GameError;
use verseplay_types::report::{WordChainCreated, WordChainReport, WordChainStatus};

use crate::corpus::CorpusProvider;
use crate::generator::LineGenerator;
use crate::registry::SessionRegistry;
use crate::wordchain::policy::GenerationPolicy;
use crate::wordchain::progression::{LevelProgression, ProgressOutcome};
use crate::wordchain::session::WordChainSession;
use crate::wordchain::{validator, DEFAULT_KEYWORDS, MAX_LEVEL};

/// Word-chain game service over a generator and corpus backend.
pub struct WordChainService<G, C> {
    registry: SessionRegistry<WordChainSession>,
    generator: G,
    corpus: C,
    policy: GenerationPolicy,
    progression: LevelProgression,
}

impl<G: LineGenerator, C: CorpusProvider> WordChainService<G, C> {
    pub fn new(generator: G, corpus: C) -> Self {
        Self {
            registry: SessionRegistry::new(),
            generator,
            corpus,
            policy: GenerationPolicy::default(),
            progression: LevelProgression::default(),
        }
    }

    /// Create a session, optionally over a custom keyword pool.
    pub fn create(&self, keywords: Option<Vec<String>>) -> Result<WordChainCreated, GameError> {
        let pool = match keywords {
            Some(pool) => {
                if pool.is_empty() {
                    return Err(GameError::Validation(
                        "keyword pool must not be empty".to_string(),
                    ));
                }
                if pool.iter().any(|k| k.trim().is_empty()) {
                    return Err(GameError::Validation(
                        "keyword pool must not contain blank entries".to_string(),
                    ));
                }
                pool
            }
            None => DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        };

        let session = WordChainSession::new(pool);
        let keyword = session.current_keyword.clone();
        let session_id = self.registry.insert(session);
        tracing::info!(%session_id, %keyword, "word-chain session created");

        Ok(WordChainCreated {
            session_id,
            level: 1,
            keyword,
            answers_per_level: self.progression.answers_per_level(),
            max_level: MAX_LEVEL,
        })
    }

    /// Judge a submitted line, produce the reply, and advance the level.
    pub async fn submit(&self, session_id: &Uuid, text: &str) -> Result<WordChainReport, GameError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GameError::Validation(
                "submission text must not be empty".to_string(),
            ));
        }

        let entry = self.registry.get(session_id)?;
        let mut session = entry.lock().await;

        if session.is_completed() {
            return Ok(completed_report(&session));
        }

        let keyword = session.current_keyword.clone();
        let user_valid = validator::is_valid_form(text, &keyword);
        session.dialogues.push(DialogueTurn::user(text));

        if !user_valid {
            let message = if !text.contains(&keyword) {
                format!("你的回答中没有包含关键字\"{keyword}\"")
            } else {
                "诗句格式不正确，需为4至30字、仅含汉字与常见标点的古诗句".to_string()
            };
            return Ok(WordChainReport {
                status: WordChainStatus::Failed,
                message: Some(message),
                ai_response: None,
                level: session.display_level(),
                keyword,
                correct_answers: session.correct_answers,
                required_answers: self.progression.answers_per_level(),
                level_changed: false,
                new_keyword: None,
                game_completed: false,
                recognized_text: None,
            });
        }

        // Generator call happens under the session lock; submissions to
        // the same session are fully serialized.
        let produced = self
            .policy
            .produce(&self.generator, &self.corpus, &keyword, &session.dialogues)
            .await;

        let ai_valid = produced.text.contains(&keyword);
        session
            .dialogues
            .push(DialogueTurn::assistant(produced.text.clone()));

        let outcome = if ai_valid {
            Some(self.progression.record_correct(&mut session))
        } else {
            None
        };

        let (level_changed, new_keyword, game_completed, message) = match &outcome {
            Some(ProgressOutcome::LevelUp { new_keyword }) => (
                true,
                Some(new_keyword.clone()),
                false,
                Some(format!(
                    "恭喜您完成第{}关，进入第{}关！",
                    session.level - 1,
                    session.level
                )),
            ),
            Some(ProgressOutcome::Completed) => (
                true,
                None,
                true,
                Some("恭喜您完成了所有关卡！".to_string()),
            ),
            Some(ProgressOutcome::Continue) => (false, None, false, None),
            None => (
                false,
                None,
                false,
                Some("AI无法生成有效回答，但您仍可继续当前关卡。".to_string()),
            ),
        };

        Ok(WordChainReport {
            status: if ai_valid {
                WordChainStatus::Success
            } else {
                WordChainStatus::AiFailed
            },
            message,
            ai_response: Some(produced.text),
            level: session.display_level(),
            keyword,
            correct_answers: session.correct_answers,
            required_answers: self.progression.answers_per_level(),
            level_changed,
            new_keyword,
            game_completed,
            recognized_text: None,
        })
    }
}

/// Report returned for submissions after the game finished.
fn completed_report(session: &WordChainSession) -> WordChainReport {
    WordChainReport {
        status: WordChainStatus::Success,
        message: Some("恭喜您完成了所有关卡！".to_string()),
        ai_response: None,
        level: session.display_level(),
        keyword: session.current_keyword.clone(),
        correct_answers: session.correct_answers,
        required_answers: crate::wordchain::ANSWERS_PER_LEVEL,
        level_changed: false,
        new_keyword: None,
        game_completed: true,
        recognized_text: None,
    }
}
