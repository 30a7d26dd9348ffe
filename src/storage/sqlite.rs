/// SQLite implementation of the preference store
///
/// This module persists the key-value namespace in a single `preferences`
/// table. Change notifications are process-local: only writes made through
/// this instance wake its subscribers.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use rusqlite::{params, Connection, OptionalExtension};
use chrono::Utc;
use tokio::sync::watch;

use crate::storage::{migrations, PreferenceStore, StorageError, ValueKind};

/// SQLite-based preference store
///
/// The connection sits behind a mutex so the store can be shared with the
/// blocking pool.
pub struct SqlitePreferences {
    conn: Mutex<Connection>,
    changes: watch::Sender<u64>,
    path: Option<PathBuf>,
}

impl SqlitePreferences {
    /// Open (or create) the store at `db_path`
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite preference store initialized at: {:?}", db_path);

        Ok(Self::from_connection(conn, Some(db_path)))
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self::from_connection(conn, None))
    }

    fn from_connection(conn: Connection, path: Option<PathBuf>) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            conn: Mutex::new(conn),
            changes,
            path,
        }
    }

    /// Location of the database file, `None` when in memory
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }

    /// Read a raw value, checking its kind tag
    fn read(&self, key: &str, expected: ValueKind) -> Result<Option<String>, StorageError> {
        let conn = self.connection()?;
        let row = conn
            .query_row(
                "SELECT value, kind FROM preferences WHERE key = ?1",
                params![key],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((value, kind)) if kind == expected.as_str() => Ok(Some(value)),
            Some((_, kind)) => Err(StorageError::TypeMismatch {
                key: key.to_string(),
                expected: expected.as_str(),
                found: kind,
            }),
        }
    }

    fn write(&self, key: &str, value: &str, kind: ValueKind) -> Result<(), StorageError> {
        {
            let conn = self.connection()?;
            conn.execute(
                "INSERT INTO preferences (key, value, kind, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    kind = excluded.kind,
                    updated_at = excluded.updated_at",
                params![key, value, kind.as_str(), Utc::now().to_rfc3339()],
            )?;
        }

        tracing::debug!("Stored preference '{}' ({} bytes)", key, value.len());
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        self.changes.send_modify(|generation| *generation += 1);
    }
}

impl PreferenceStore for SqlitePreferences {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.read(key, ValueKind::String)
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write(key, value, ValueKind::String)
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>, StorageError> {
        match self.read(key, ValueKind::Bool)? {
            None => Ok(None),
            Some(value) => match value.as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                other => Err(StorageError::TypeMismatch {
                    key: key.to_string(),
                    expected: ValueKind::Bool.as_str(),
                    found: format!("malformed '{}'", other),
                }),
            },
        }
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), StorageError> {
        let encoded = if value { "true" } else { "false" };
        self.write(key, encoded, ValueKind::Bool)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let rows_affected = {
            let conn = self.connection()?;
            conn.execute("DELETE FROM preferences WHERE key = ?1", params![key])?
        };

        tracing::debug!("Removed preference '{}' ({} row(s))", key, rows_affected);
        self.notify();
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}
