use crate::error::{LensError, Result};
use crate::model::{CommitRecord, PullRequestRecord, SCHEMA_VERSION};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;

/// Read-only view over a pre-populated SQLite store holding the full
/// history in `commits` and `pull_requests` tables keyed by repo_name.
/// The connection is constructed explicitly by the caller; there is no
/// ambient global client.
pub struct DbSource {
    conn: Connection,
}

impl DbSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let source = Self { conn };
        source.check_schema_version()?;
        Ok(source)
    }

    // Accepts 0 so a store that never set a version still opens; the
    // source never writes the pragma itself.
    fn check_schema_version(&self) -> Result<()> {
        let user_version: i64 = self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?;

        if user_version != 0 && user_version != SCHEMA_VERSION as i64 {
            return Err(LensError::Fetch(format!(
                "Schema version mismatch: expected {}, found {}",
                SCHEMA_VERSION, user_version
            )));
        }

        Ok(())
    }

    pub fn fetch_commits(&self, repo_name: &str) -> Result<Vec<CommitRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT sha, message, author, date, url FROM commits
             WHERE repo_name = ? ORDER BY date",
        )?;

        let rows = stmt.query_map(params![repo_name], |row| {
            let date: DateTime<Utc> = row.get(3)?;
            Ok(CommitRecord {
                sha: row.get(0)?,
                message: row.get(1)?,
                author: row.get(2)?,
                date,
                url: row.get(4)?,
                repo_name: repo_name.to_string(),
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    pub fn fetch_pulls(&self, repo_name: &str) -> Result<Vec<PullRequestRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT number, title, author, created_at, state, comments, review_comments, commits, url
             FROM pull_requests WHERE repo_name = ? ORDER BY number",
        )?;

        let rows = stmt.query_map(params![repo_name], |row| {
            let created_at: DateTime<Utc> = row.get(3)?;
            let state: String = row.get(4)?;

            // The sha list is stored as a JSON text column.
            let shas_json: String = row.get(7)?;
            let commit_shas: Vec<String> = serde_json::from_str(&shas_json).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    7,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

            Ok(PullRequestRecord {
                number: row.get(0)?,
                title: row.get(1)?,
                author: row.get(2)?,
                created_at,
                state: state.into(),
                comments: row.get(5)?,
                review_comments: row.get(6)?,
                commit_shas,
                url: row.get(8)?,
                repo_name: repo_name.to_string(),
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }
}
