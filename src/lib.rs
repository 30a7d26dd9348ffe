/// Public library interface for the habit tracker core
///
/// This module exports the domain types, the preference-backed repositories
/// and the use cases, plus [`HabitTracker`], which wires them together over
/// a single store.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

// Internal modules
mod domain;
pub mod repository;
pub mod storage;
pub mod usecases;

// Re-export public modules and types
pub use domain::*;
pub use repository::{
    FocusReminderStore, HabitRepository, PreferencesFocusReminder, PreferencesHabitRepository,
};
pub use storage::{
    CodecError, MemoryPreferences, PreferenceStore, SqlitePreferences, StorageError,
};

/// Errors surfaced by the tracker and its use cases
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: HabitId },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Habit repository and focus reminder switch sharing one store
///
/// Both repositories write into the same key-value namespace, so a
/// subscriber of either sees every change.
pub struct HabitTracker<S: PreferenceStore + 'static> {
    store: Arc<S>,
    habits: PreferencesHabitRepository<S>,
    focus_reminder: PreferencesFocusReminder<S>,
}

impl HabitTracker<SqlitePreferences> {
    /// Open a tracker backed by the SQLite file at `db_path`
    ///
    /// This will initialize the database schema if it doesn't already exist.
    pub async fn new(db_path: PathBuf) -> Result<Self, TrackerError> {
        tracing::info!("Initializing habit tracker with database: {:?}", db_path);

        let store = tokio::task::spawn_blocking(move || SqlitePreferences::new(db_path))
            .await
            .map_err(StorageError::from)??;

        Ok(Self::with_store(Arc::new(store)))
    }
}

impl HabitTracker<MemoryPreferences> {
    /// Tracker whose data lives only as long as the process
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryPreferences::new()))
    }
}

impl<S: PreferenceStore + 'static> HabitTracker<S> {
    /// Build a tracker over an existing store
    pub fn with_store(store: Arc<S>) -> Self {
        Self {
            habits: PreferencesHabitRepository::new(Arc::clone(&store)),
            focus_reminder: PreferencesFocusReminder::new(Arc::clone(&store)),
            store,
        }
    }

    /// Get a reference to the habit repository
    pub fn habits(&self) -> &PreferencesHabitRepository<S> {
        &self.habits
    }

    /// Get a reference to the focus reminder switch
    pub fn focus_reminder(&self) -> &PreferencesFocusReminder<S> {
        &self.focus_reminder
    }

    /// Get a reference to the underlying store (useful for testing)
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}
