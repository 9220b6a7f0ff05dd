//! Word-chain (FeiHuaLing) game engine.
//!
//! Turn-based keyword couplet game: every line, user's and assistant's,
//! must contain the level's keyword. Three correct exchanges advance the
//! level; five levels complete the game. Assistant lines come from a
//! bounded-retry generation policy that degrades to corpus lookup and
//! finally a canned line, so a submission never fails on upstream
//! trouble.

pub mod policy;
pub mod progression;
pub mod rotation;
pub mod service;
pub mod session;
pub mod validator;

pub use policy::{GenerationPolicy, ProducedLine, ProducedVia};
pub use progression::{LevelProgression, ProgressOutcome};
pub use rotation::KeywordRotation;
pub use service::WordChainService;
pub use session::WordChainSession;

/// Default keyword pool, one character per level draw.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "月", "花", "山", "水", "树", "风", "雨", "云", "天", "雾", "露", "霜", "雪", "声", "草",
    "木", "石", "鸟", "虫",
];

/// Correct exchanges required to clear a level.
pub const ANSWERS_PER_LEVEL: u32 = 3;

/// Number of levels; clearing the last one completes the game.
pub const MAX_LEVEL: u32 = 5;
