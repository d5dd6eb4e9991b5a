//! SQLite persistence for user records and scores.
//!
//! Schema: a single `Users` table keyed by `Username`, holding the password
//! as an opaque string and the player's integer `Score`. The table is created
//! on open if missing, so a fresh database file is usable immediately.
//!
//! All statements are parameterised; usernames and passwords never reach SQL
//! text.

use std::path::Path;

use log::{debug, info, warn};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::error::DuelError;
use crate::types::LeaderboardEntry;

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS Users (
    Username TEXT PRIMARY KEY NOT NULL,
    Password TEXT NOT NULL,
    Score    INTEGER NOT NULL DEFAULT 0
)";

/// Score and account persistence used by the session.
pub trait ScoreStore {
    /// Persisted score of `username`, or 0 for an unknown user.
    fn get_score(&self, username: &str) -> Result<i32, DuelError>;

    /// Overwrite the persisted score of `username`.
    fn set_score(&mut self, username: &str, score: i32) -> Result<(), DuelError>;

    /// Up to `n` players ranked by descending score.
    fn top_n(&self, n: usize) -> Result<Vec<LeaderboardEntry>, DuelError>;

    fn username_exists(&self, username: &str) -> Result<bool, DuelError>;

    fn credentials_match(&self, username: &str, password: &str) -> Result<bool, DuelError>;

    /// Create a user with score 0. Fails with [`DuelError::UsernameTaken`] on a duplicate.
    fn register(&mut self, username: &str, password: &str) -> Result<(), DuelError>;
}

/// [`ScoreStore`] backed by a SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DuelError> {
        let path = path.as_ref();
        debug!("Opening score database {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// A private database that lives as long as the store.
    pub fn open_in_memory() -> Result<Self, DuelError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, DuelError> {
        conn.execute_batch(CREATE_USERS_TABLE)?;
        Ok(Self { conn })
    }

    /// Close the connection, reporting any error SQLite raises while doing so.
    pub fn close(self) -> Result<(), DuelError> {
        self.conn.close().map_err(|(_, e)| DuelError::Storage(e))
    }
}

impl ScoreStore for SqliteStore {
    fn get_score(&self, username: &str) -> Result<i32, DuelError> {
        let score = self
            .conn
            .query_row(
                "SELECT Score FROM Users WHERE Username = ?1",
                params![username],
                |row| row.get::<_, i32>(0),
            )
            .optional()?;
        Ok(score.unwrap_or(0))
    }

    fn set_score(&mut self, username: &str, score: i32) -> Result<(), DuelError> {
        let updated = self.conn.execute(
            "UPDATE Users SET Score = ?1 WHERE Username = ?2",
            params![score, username],
        )?;
        if updated == 0 {
            warn!("No stored account for {}; score {} not saved", username, score);
        } else {
            info!("Saved score {} for {}", score, username);
        }
        Ok(())
    }

    fn top_n(&self, n: usize) -> Result<Vec<LeaderboardEntry>, DuelError> {
        let limit = i64::try_from(n).unwrap_or(i64::MAX);
        let mut stmt = self
            .conn
            .prepare("SELECT Username, Score FROM Users ORDER BY Score DESC LIMIT ?1")?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i32>(1)?))
        })?;

        let mut entries = Vec::with_capacity(n.min(64));
        for (i, row) in rows.enumerate() {
            let (username, score) = row?;
            entries.push(LeaderboardEntry {
                rank: i + 1,
                username,
                score,
            });
        }
        debug!("Leaderboard query returned {} of {} rows", entries.len(), n);
        Ok(entries)
    }

    fn username_exists(&self, username: &str) -> Result<bool, DuelError> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM Users WHERE Username = ?1)",
            params![username],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(exists)
    }

    fn credentials_match(&self, username: &str, password: &str) -> Result<bool, DuelError> {
        let found = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM Users WHERE Username = ?1 AND Password = ?2)",
            params![username, password],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(found)
    }

    fn register(&mut self, username: &str, password: &str) -> Result<(), DuelError> {
        match self.conn.execute(
            "INSERT INTO Users (Username, Password, Score) VALUES (?1, ?2, 0)",
            params![username, password],
        ) {
            Ok(_) => {
                info!("Registered {}", username);
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(DuelError::UsernameTaken(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(users: &[(&str, &str, i32)]) -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        for &(name, pass, score) in users {
            store.register(name, pass).unwrap();
            store.set_score(name, score).unwrap();
        }
        store
    }

    #[test]
    fn test_unknown_user_scores_zero() {
        let store = store_with(&[]);
        assert_eq!(store.get_score("nobody").unwrap(), 0);
    }

    #[test]
    fn test_register_starts_at_zero() {
        let mut store = store_with(&[]);
        store.register("alice", "pa$s12").unwrap();
        assert!(store.username_exists("alice").unwrap());
        assert_eq!(store.get_score("alice").unwrap(), 0);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let mut store = store_with(&[("alice", "pa$s12", 5)]);
        match store.register("alice", "other#9") {
            Err(DuelError::UsernameTaken(name)) => assert_eq!(name, "alice"),
            other => panic!("expected UsernameTaken, got {:?}", other),
        }
        assert_eq!(store.get_score("alice").unwrap(), 5);
    }

    #[test]
    fn test_credentials_match() {
        let store = store_with(&[("alice", "pa$s12", 0)]);
        assert!(store.credentials_match("alice", "pa$s12").unwrap());
        assert!(!store.credentials_match("alice", "pa$s13").unwrap());
        assert!(!store.credentials_match("bob", "pa$s12").unwrap());
    }

    #[test]
    fn test_quotes_are_data() {
        let mut store = store_with(&[]);
        store.register("o'neil", "it's#1a").unwrap();
        assert!(store.credentials_match("o'neil", "it's#1a").unwrap());
        assert!(!store.credentials_match("' OR 1=1 --", "x").unwrap());
    }

    #[test]
    fn test_set_score_unknown_user_is_noop() {
        let mut store = store_with(&[]);
        store.set_score("ghost", 40).unwrap();
        assert!(!store.username_exists("ghost").unwrap());
    }

    #[test]
    fn test_top_n_descending_and_limited() {
        let store = store_with(&[
            ("ann", "x", 10),
            ("ben", "x", 40),
            ("cid", "x", 25),
            ("dot", "x", 5),
            ("eve", "x", 30),
            ("fay", "x", 15),
        ]);
        let top = store.top_n(5).unwrap();
        let names: Vec<&str> = top.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["ben", "eve", "cid", "fay", "ann"]);
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[4].rank, 5);
        assert_eq!(top[0].score, 40);

        assert_eq!(store.top_n(0).unwrap().len(), 0);
        assert_eq!(store.top_n(100).unwrap().len(), 6);
    }
}
