//! SQLite corpus backend.

pub mod corpus;
pub mod pool;

pub use corpus::SqliteCorpusRepository;
pub use pool::CorpusPool;
