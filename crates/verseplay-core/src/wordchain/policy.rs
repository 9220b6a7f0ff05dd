//! Reply production with bounded retry and graceful degradation.
//!
//! The policy is an explicit ladder of strategies, tried in order with
//! the first success winning:
//!
//! 1. generator, up to three attempts, each candidate validated for form
//!    and checked against the full dialogue history for duplication;
//! 2. a corpus line for the keyword not yet seen in the history and not
//!    overlapping any history line;
//! 3. a corpus line allowing overlap with earlier lines;
//! 4. a canned apology naming the keyword.
//!
//! The ladder never errors: upstream failures and exhausted retries
//! degrade to the next rung, and the last rung always produces text.

use rand::seq::SliceRandom;
use tracing::{debug, warn};

use verseplay_types::dialogue::DialogueTurn;

use crate::corpus::CorpusProvider;
use crate::generator::LineGenerator;
use crate::wordchain::validator;

/// Which rung of the ladder produced the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProducedVia {
    /// The generator produced a valid, novel line on the given attempt (1-based).
    Generated { attempt: u32 },
    /// A corpus line unused in this session and dissimilar to the history.
    CorpusFresh,
    /// A corpus line reused despite similarity to earlier lines.
    CorpusReused,
    /// The fixed apology line.
    Canned,
}

/// A produced reply line together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducedLine {
    pub text: String,
    pub via: ProducedVia,
}

/// Orchestrates generator retries and corpus fallback for one keyword.
#[derive(Debug, Clone)]
pub struct GenerationPolicy {
    max_attempts: u32,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

impl GenerationPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// The system instruction sent with every generation attempt.
    pub fn instruction(keyword: &str) -> String {
        format!(
            "请严格按照以下要求回复:\n\
             1. 只输出一句包含\"{keyword}\"的古诗句\n\
             2. 不要输出任何其他解释文字\n\
             3. 不能与之前的对话重复或包含相同诗句\n\
             4. 必须是真实存在的古诗句\n\
             5. 如果是完整诗句的一部分,必须是独立完整的意思单位\n\
             6. 尽量避免使用与之前诗句相似的诗句"
        )
    }

    /// Produce a reply line for `keyword` given the session history.
    ///
    /// The history is read-only here; the caller records the produced
    /// line into the dialogue after judging it.
    pub async fn produce<G, C>(
        &self,
        generator: &G,
        corpus: &C,
        keyword: &str,
        history: &[DialogueTurn],
    ) -> ProducedLine
    where
        G: LineGenerator,
        C: CorpusProvider,
    {
        let history_lines: Vec<&str> = history.iter().map(|t| t.content.as_str()).collect();
        let instruction = Self::instruction(keyword);

        for attempt in 1..=self.max_attempts {
            match generator.complete(&instruction, history).await {
                Ok(candidate) => {
                    let candidate = candidate.trim().to_string();
                    if !validator::is_valid_form(&candidate, keyword) {
                        debug!(attempt, %candidate, "generated line failed form check");
                        continue;
                    }
                    if validator::is_duplicate(&candidate, &history_lines) {
                        debug!(attempt, %candidate, "generated line duplicates history");
                        continue;
                    }
                    return ProducedLine {
                        text: candidate,
                        via: ProducedVia::Generated { attempt },
                    };
                }
                Err(err) => {
                    warn!(attempt, error = %err, "generator attempt failed");
                }
            }
        }

        debug!(%keyword, "generation exhausted, falling back to corpus");
        self.corpus_fallback(corpus, keyword, &history_lines).await
    }

    /// Rungs 2..4: corpus lookup, then reuse, then the canned line.
    async fn corpus_fallback<C: CorpusProvider>(
        &self,
        corpus: &C,
        keyword: &str,
        history_lines: &[&str],
    ) -> ProducedLine {
        let all = match corpus.lines_containing(keyword).await {
            Ok(lines) => lines,
            Err(err) => {
                warn!(%keyword, error = %err, "corpus lookup failed");
                Vec::new()
            }
        };

        let mut rng = rand::thread_rng();

        // Lines not already spoken in this session.
        let available: Vec<&String> = all
            .iter()
            .filter(|line| !history_lines.contains(&line.as_str()))
            .collect();

        // Of those, lines not overlapping any history line too closely.
        let fresh: Vec<&&String> = available
            .iter()
            .filter(|line| {
                history_lines
                    .iter()
                    .all(|prior| validator::overlap_ratio(line, prior) <= 0.6)
            })
            .collect();

        if let Some(line) = fresh.choose(&mut rng) {
            return ProducedLine {
                text: (***line).clone(),
                via: ProducedVia::CorpusFresh,
            };
        }

        if let Some(line) = available.choose(&mut rng) {
            warn!(%keyword, "no fresh corpus line, reusing a similar one");
            return ProducedLine {
                text: (**line).clone(),
                via: ProducedVia::CorpusReused,
            };
        }

        warn!(%keyword, "no corpus line available, using canned reply");
        ProducedLine {
            text: format!("抱歉,我想不出包含'{keyword}'的诗句了,换个关键字试试吧"),
            via: ProducedVia::Canned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use verseplay_types::corpus::{GridQuestion, Poem};
    use verseplay_types::error::{CorpusError, GeneratorError};

    /// Generator that replays a scripted sequence of results.
    struct ScriptedGenerator {
        replies: Mutex<VecDeque<Result<String, GeneratorError>>>,
    }

    impl ScriptedGenerator {
        fn new(replies: Vec<Result<String, GeneratorError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
            }
        }

        fn failing() -> Self {
            Self::new(vec![
                Err(GeneratorError::Request("down".into())),
                Err(GeneratorError::Request("down".into())),
                Err(GeneratorError::Request("down".into())),
            ])
        }
    }

    impl LineGenerator for ScriptedGenerator {
        async fn complete(
            &self,
            _system: &str,
            _history: &[DialogueTurn],
        ) -> Result<String, GeneratorError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(GeneratorError::Request("script exhausted".into())))
        }
    }

    /// Corpus with a fixed line list for every keyword.
    struct FixedCorpus {
        lines: Vec<String>,
    }

    impl CorpusProvider for FixedCorpus {
        async fn lines_containing(&self, _keyword: &str) -> Result<Vec<String>, CorpusError> {
            Ok(self.lines.clone())
        }

        async fn poems_ordered_by_id(&self, _limit: u32) -> Result<Vec<Poem>, CorpusError> {
            Ok(Vec::new())
        }

        async fn grid_questions(&self) -> Result<Vec<GridQuestion>, CorpusError> {
            Ok(Vec::new())
        }
    }

    fn history(lines: &[&str]) -> Vec<DialogueTurn> {
        lines.iter().map(|l| DialogueTurn::user(*l)).collect()
    }

    #[tokio::test]
    async fn first_valid_generation_wins() {
        let generator = ScriptedGenerator::new(vec![Ok("月落乌啼霜满天".to_string())]);
        let corpus = FixedCorpus { lines: vec![] };
        let policy = GenerationPolicy::default();

        let line = policy.produce(&generator, &corpus, "月", &[]).await;
        assert_eq!(line.text, "月落乌啼霜满天");
        assert_eq!(line.via, ProducedVia::Generated { attempt: 1 });
    }

    #[tokio::test]
    async fn invalid_then_valid_takes_second_attempt() {
        let generator = ScriptedGenerator::new(vec![
            Ok("the moon is bright".to_string()), // fails form check
            Ok("海上生明月".to_string()),
        ]);
        let corpus = FixedCorpus { lines: vec![] };
        let policy = GenerationPolicy::default();

        let line = policy.produce(&generator, &corpus, "月", &[]).await;
        assert_eq!(line.via, ProducedVia::Generated { attempt: 2 });
    }

    #[tokio::test]
    async fn duplicate_generation_is_rejected() {
        let generator = ScriptedGenerator::new(vec![
            Ok("床前明月光".to_string()), // already in history
            Ok("海上生明月".to_string()),
        ]);
        let corpus = FixedCorpus { lines: vec![] };
        let policy = GenerationPolicy::default();

        let line = policy
            .produce(&generator, &corpus, "月", &history(&["床前明月光"]))
            .await;
        assert_eq!(line.text, "海上生明月");
    }

    #[tokio::test]
    async fn exhausted_generator_falls_back_to_fresh_corpus_line() {
        let generator = ScriptedGenerator::failing();
        let corpus = FixedCorpus {
            lines: vec!["举头望明月".to_string()],
        };
        let policy = GenerationPolicy::default();

        let line = policy
            .produce(&generator, &corpus, "月", &history(&["春江潮水连海平"]))
            .await;
        assert_eq!(line.text, "举头望明月");
        assert_eq!(line.via, ProducedVia::CorpusFresh);
    }

    #[tokio::test]
    async fn similar_corpus_line_is_reused_when_nothing_fresh() {
        // The only corpus line is contained in (and overlaps) a history line,
        // but is not an exact repeat, so the reuse rung picks it up.
        let generator = ScriptedGenerator::failing();
        let corpus = FixedCorpus {
            lines: vec!["床前明月光".to_string()],
        };
        let policy = GenerationPolicy::default();

        let line = policy
            .produce(
                &generator,
                &corpus,
                "月",
                &history(&["床前明月光，疑是地上霜"]),
            )
            .await;
        assert_eq!(line.via, ProducedVia::CorpusReused);
    }

    #[tokio::test]
    async fn empty_corpus_degrades_to_canned_line() {
        let generator = ScriptedGenerator::failing();
        let corpus = FixedCorpus { lines: vec![] };
        let policy = GenerationPolicy::default();

        let line = policy.produce(&generator, &corpus, "雪", &[]).await;
        assert_eq!(line.via, ProducedVia::Canned);
        assert!(line.text.contains('雪'));
    }

    #[tokio::test]
    async fn exact_history_repeat_in_corpus_goes_canned() {
        let generator = ScriptedGenerator::failing();
        let corpus = FixedCorpus {
            lines: vec!["床前明月光".to_string()],
        };
        let policy = GenerationPolicy::default();

        let line = policy
            .produce(&generator, &corpus, "月", &history(&["床前明月光"]))
            .await;
        assert_eq!(line.via, ProducedVia::Canned);
    }
}
