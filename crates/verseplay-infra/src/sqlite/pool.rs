//! Read pool for the pre-populated corpus database.
//!
//! The corpus is read-only at runtime: poems, poem lines, and grid
//! questions are loaded out-of-band. A small multi-connection pool
//! serves concurrent SELECTs; there is no writer.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Reader pool over the corpus SQLite database.
#[derive(Clone)]
pub struct CorpusPool {
    pub reader: SqlitePool,
}

impl CorpusPool {
    /// Open the corpus database with a multi-connection reader pool.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let opts = SqliteConnectOptions::from_str(database_url)?
            .busy_timeout(std::time::Duration::from_secs(5));

        let reader = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(opts)
            .await?;

        Ok(Self { reader })
    }
}

impl From<SqlitePool> for CorpusPool {
    fn from(reader: SqlitePool) -> Self {
        Self { reader }
    }
}
