//! Database connection and operations

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::store::{KeyValueStore, StorageKey};
use crate::Result;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL keeps readers from blocking the single writer
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value, updated_at],
            )?;
            Ok(())
        })?;

        tracing::debug!(key = %key, bytes = value.len(), "Persisted setting");

        Ok(())
    }

    pub fn remove_setting(&self, key: &str) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute("DELETE FROM settings WHERE key = ?1", [key])?;
            Ok(())
        })
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        self.get_setting(key.as_str())
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        self.set_setting(key.as_str(), value)
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        self.remove_setting(key.as_str())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        db.with_connection(|conn| {
            let count: i32 =
                conn.query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0))?;
            assert_eq!(count, 0);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_set_overwrites_whole_value() {
        let db = Database::open_in_memory().unwrap();

        db.set(StorageKey::Theme, "\"light\"").unwrap();
        db.set(StorageKey::Theme, "\"dark\"").unwrap();

        assert_eq!(db.get(StorageKey::Theme).unwrap().as_deref(), Some("\"dark\""));
        assert!(db.get(StorageKey::Sessions).unwrap().is_none());
    }

    #[test]
    fn test_remove() {
        let db = Database::open_in_memory().unwrap();
        db.set(StorageKey::Shortcuts, "[]").unwrap();
        db.remove(StorageKey::Shortcuts).unwrap();
        assert!(db.get(StorageKey::Shortcuts).unwrap().is_none());
    }

    #[test]
    fn test_clones_share_connection() {
        let db = Database::open_in_memory().unwrap();
        let other = db.clone();

        db.set(StorageKey::SortPreference, "\"tabs\"").unwrap();
        assert_eq!(
            other.get(StorageKey::SortPreference).unwrap().as_deref(),
            Some("\"tabs\"")
        );
    }

    #[test]
    fn test_reopen_file_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nightowl.db");

        {
            let db = Database::open(&path).unwrap();
            db.set(StorageKey::Theme, "\"light\"").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.get(StorageKey::Theme).unwrap().as_deref(), Some("\"light\""));
    }
}
