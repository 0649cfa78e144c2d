//! SpecDraft Storage Layer
//!
//! Implements the `SpecStore` trait over SQLite and the `ArtifactStore`
//! trait over the local filesystem.
//!
//! # Architecture
//!
//! - SQLite for structured records: one row per generated specification,
//!   with the document serialized as JSON and `created_at` assigned by the
//!   database
//! - A directory tree for raw requirement artifacts, keyed
//!   `{user_id}/{filename}`
//!
//! # Examples
//!
//! ```no_run
//! use specdraft_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for record operations
//! ```

#![warn(missing_docs)]

mod artifact;

pub use artifact::FsArtifactStore;

use rusqlite::{params, Connection};
use specdraft_domain::traits::SpecStore;
use specdraft_domain::{SpecRecord, SpecificationDocument, StoredRecord};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Document (de)serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error in the artifact store
    #[error("artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact key escapes the artifact root
    #[error("invalid artifact key: {0}")]
    InvalidKey(String),
}

/// SQLite-backed implementation of `SpecStore`.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe; share a store across tasks
/// behind a `Mutex`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path.
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Total number of stored records (all users)
    pub fn record_count(&self) -> Result<usize, StoreError> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM specifications", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl SpecStore for SqliteStore {
    type Error = StoreError;

    fn insert_record(&mut self, record: &StoredRecord) -> Result<i64, StoreError> {
        let content_json = serde_json::to_string(&record.content)?;

        self.conn.execute(
            "INSERT INTO specifications (user_id, raw_filename, content_json)
             VALUES (?1, ?2, ?3)",
            params![record.user_id, record.raw_filename, content_json],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn records_for_user(&self, user_id: &str) -> Result<Vec<SpecRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, raw_filename, content_json, created_at
             FROM specifications
             WHERE user_id = ?1
             ORDER BY id DESC",
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, user_id, raw_filename, content_json, created_at) = row?;
            let content: SpecificationDocument = serde_json::from_str(&content_json)?;
            records.push(SpecRecord {
                id,
                user_id,
                raw_filename,
                content,
                created_at,
            });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specdraft_domain::UserIdentity;

    fn sample_record(user: &str, filename: &str) -> StoredRecord {
        let identity = UserIdentity::new(user, 2_000_000_000);
        StoredRecord::new(
            &identity,
            filename,
            SpecificationDocument {
                modules: vec!["ordering".to_string()],
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_insert_and_read_back() {
        let mut store = SqliteStore::new(":memory:").unwrap();

        let id = store
            .insert_record(&sample_record("user-1", "reqs.pdf"))
            .unwrap();
        assert!(id > 0);

        let records = store.records_for_user("user-1").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].raw_filename, "reqs.pdf");
        assert_eq!(records[0].content.modules, vec!["ordering"]);
        assert!(!records[0].created_at.is_empty());
    }

    #[test]
    fn test_records_are_scoped_per_user() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        store.insert_record(&sample_record("alice", "a.txt")).unwrap();
        store.insert_record(&sample_record("bob", "b.txt")).unwrap();

        let alice = store.records_for_user("alice").unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].raw_filename, "a.txt");
    }

    #[test]
    fn test_duplicate_inserts_create_independent_rows() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let record = sample_record("user-1", "same.txt");

        let first = store.insert_record(&record).unwrap();
        let second = store.insert_record(&record).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.record_count().unwrap(), 2);
    }

    #[test]
    fn test_listing_is_newest_first() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        store.insert_record(&sample_record("u", "first.txt")).unwrap();
        store.insert_record(&sample_record("u", "second.txt")).unwrap();

        let records = store.records_for_user("u").unwrap();
        assert_eq!(records[0].raw_filename, "second.txt");
        assert_eq!(records[1].raw_filename, "first.txt");
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("specdraft.db");

        {
            let mut store = SqliteStore::new(&db_path).unwrap();
            store.insert_record(&sample_record("u", "f.txt")).unwrap();
        }

        let store = SqliteStore::new(&db_path).unwrap();
        assert_eq!(store.record_count().unwrap(), 1);
    }
}
