//! Key-value storage contract and its SQLite / in-memory implementations.

use crate::db::{open_db, open_db_in_memory};
use crate::repo::RepoResult;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;

/// String key-value storage addressed by namespace.
pub trait KvRepository {
    fn get(&self, namespace: &str) -> RepoResult<Option<String>>;
    fn put(&mut self, namespace: &str, value: &str) -> RepoResult<()>;
}

/// SQLite-backed key-value storage.
pub struct SqliteKvRepository {
    conn: Connection,
}

impl SqliteKvRepository {
    /// Opens (or creates) the storage file at `path`.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens a private in-memory storage database.
    pub fn in_memory() -> RepoResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Wraps a connection that already has migrations applied.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KvRepository for SqliteKvRepository {
    fn get(&self, namespace: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE namespace = ?1;",
                params![namespace],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&mut self, namespace: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (namespace, value) VALUES (?1, ?2)
             ON CONFLICT(namespace) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![namespace, value],
        )?;
        Ok(())
    }
}

/// Process-local key-value storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvRepository {
    entries: BTreeMap<String, String>,
}

impl MemoryKvRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvRepository for MemoryKvRepository {
    fn get(&self, namespace: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.get(namespace).cloned())
    }

    fn put(&mut self, namespace: &str, value: &str) -> RepoResult<()> {
        self.entries.insert(namespace.to_string(), value.to_string());
        Ok(())
    }
}
