//! SQLite corpus repository.
//!
//! Implements `CorpusProvider` over three tables:
//!
//! - `poem(poem_id, title, author)` -- poem metadata;
//! - `poem_lines(poem_id, line_number, content)` -- lines in order;
//! - `ninegrid(grid_id, question, answer)` -- quiz questions, where
//!   `question` is stored in one of three historical formats: a JSON
//!   3x3 array, a bare 9-character string, or `a,b,c;d,e,f;g,h,i`.
//!
//! Malformed grid rows are skipped with a warning rather than failing
//! the whole load.

use sqlx::Row;
use tracing::warn;

use verseplay_core::corpus::CorpusProvider;
use verseplay_types::corpus::{GridQuestion, Poem};
use verseplay_types::error::CorpusError;

use super::pool::CorpusPool;

/// SQLite-backed implementation of `CorpusProvider`.
pub struct SqliteCorpusRepository {
    pool: CorpusPool,
}

impl SqliteCorpusRepository {
    pub fn new(pool: CorpusPool) -> Self {
        Self { pool }
    }
}

fn query_error(e: sqlx::Error) -> CorpusError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            CorpusError::Connection
        }
        other => CorpusError::Query(other.to_string()),
    }
}

/// Parse a stored grid question string into a 3x3 grid.
///
/// Accepted formats, tried in order: JSON array of three 3-element rows,
/// a 9-character string read row-major, and three semicolon-separated
/// rows of three comma-separated cells.
fn parse_grid(raw: &str) -> Option<[[String; 3]; 3]> {
    if let Ok(rows) = serde_json::from_str::<Vec<Vec<String>>>(raw) {
        return rows_to_grid(rows);
    }

    let chars: Vec<char> = raw.chars().collect();
    if chars.len() == 9 && !raw.contains(';') && !raw.contains(',') {
        let cell = |i: usize| chars[i].to_string();
        return Some([
            [cell(0), cell(1), cell(2)],
            [cell(3), cell(4), cell(5)],
            [cell(6), cell(7), cell(8)],
        ]);
    }

    let rows: Vec<Vec<String>> = raw
        .split(';')
        .map(|row| row.split(',').map(|c| c.trim().to_string()).collect())
        .collect();
    rows_to_grid(rows)
}

fn rows_to_grid(rows: Vec<Vec<String>>) -> Option<[[String; 3]; 3]> {
    if rows.len() != 3 || rows.iter().any(|r| r.len() != 3) {
        return None;
    }
    let mut iter = rows.into_iter();
    let row = |r: Vec<String>| -> [String; 3] {
        let mut it = r.into_iter();
        [it.next().unwrap(), it.next().unwrap(), it.next().unwrap()]
    };
    Some([
        row(iter.next().unwrap()),
        row(iter.next().unwrap()),
        row(iter.next().unwrap()),
    ])
}

impl CorpusProvider for SqliteCorpusRepository {
    async fn lines_containing(&self, keyword: &str) -> Result<Vec<String>, CorpusError> {
        let pattern = format!("%{keyword}%");
        let rows = sqlx::query("SELECT content FROM poem_lines WHERE content LIKE ?")
            .bind(&pattern)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        let lines: Vec<String> = rows
            .iter()
            .map(|row| row.try_get("content"))
            .collect::<Result<_, _>>()
            .map_err(query_error)?;

        tracing::debug!(%keyword, count = lines.len(), "corpus lines fetched");
        Ok(lines)
    }

    async fn poems_ordered_by_id(&self, limit: u32) -> Result<Vec<Poem>, CorpusError> {
        let poem_rows =
            sqlx::query("SELECT poem_id, title, author FROM poem ORDER BY poem_id ASC LIMIT ?")
                .bind(limit as i64)
                .fetch_all(&self.pool.reader)
                .await
                .map_err(query_error)?;

        let mut poems = Vec::with_capacity(poem_rows.len());
        for row in &poem_rows {
            let poem_id: i64 = row.try_get("poem_id").map_err(query_error)?;
            let title: String = row.try_get("title").map_err(query_error)?;
            let author: String = row.try_get("author").map_err(query_error)?;

            let line_rows = sqlx::query(
                "SELECT content FROM poem_lines WHERE poem_id = ? ORDER BY line_number ASC",
            )
            .bind(poem_id)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

            let lines: Vec<String> = line_rows
                .iter()
                .map(|r| r.try_get("content"))
                .collect::<Result<_, _>>()
                .map_err(query_error)?;

            poems.push(Poem::new(poem_id, title, author, lines));
        }

        tracing::debug!(count = poems.len(), "poems loaded");
        Ok(poems)
    }

    async fn grid_questions(&self) -> Result<Vec<GridQuestion>, CorpusError> {
        let rows = sqlx::query("SELECT grid_id, question, answer FROM ninegrid")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        let mut questions = Vec::with_capacity(rows.len());
        for row in &rows {
            let grid_id: i64 = row.try_get("grid_id").map_err(query_error)?;
            let raw: String = row.try_get("question").map_err(query_error)?;
            let answer: String = row.try_get("answer").map_err(query_error)?;

            match parse_grid(&raw) {
                Some(grid) => questions.push(GridQuestion { grid, answer }),
                None => warn!(grid_id, question = %raw, "skipping malformed grid question"),
            }
        }

        tracing::debug!(count = questions.len(), "grid questions loaded");
        Ok(questions)
    }
}
