/// Storage layer for persisting habit data
///
/// Everything the app persists lives in one key-value namespace. The habit
/// list is a single encoded string (see [`codec`]); the focus reminder switch
/// is a boolean next to it. This module defines that namespace and the two
/// backends that implement it.

pub mod codec;
pub mod memory;
pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use codec::{decode_habits, encode_habits, CodecError};
pub use memory::MemoryPreferences;
pub use sqlite::SqlitePreferences;

use thiserror::Error;
use tokio::sync::watch;

/// Key holding the encoded habit list; absent means no habits
pub const HABITS_KEY: &str = "habits_serialized";

/// Key holding the focus reminder switch; absent means enabled
pub const FOCUS_REMINDER_ENABLED_KEY: &str = "focus_reminder_enabled";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Stored habits are corrupt: {0}")]
    Codec(#[from] CodecError),

    #[error("Preference '{key}' holds a {found} value, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: String,
    },

    #[error("Storage lock poisoned")]
    Poisoned,

    #[error("Background storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("No habit id left after {max}")]
    IdsExhausted { max: crate::domain::HabitId },
}

/// Trait defining the key-value namespace the app persists into
///
/// Operations are synchronous; async callers run them on the blocking pool.
/// Every successful write bumps a generation counter that subscribers can
/// watch to learn that the namespace changed.
pub trait PreferenceStore: Send + Sync {
    /// Read a string value
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a string value, replacing any previous value
    fn set_string(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Read a boolean value
    fn get_bool(&self, key: &str) -> Result<Option<bool>, StorageError>;

    /// Write a boolean value, replacing any previous value
    fn set_bool(&self, key: &str, value: bool) -> Result<(), StorageError>;

    /// Remove a key; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Receiver that observes the generation counter
    fn subscribe(&self) -> watch::Receiver<u64>;
}

/// Kind tag stored next to each value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueKind {
    String,
    Bool,
}

impl ValueKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Bool => "bool",
        }
    }
}
