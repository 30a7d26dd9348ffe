/// Repository contracts over the preference store
///
/// Repositories are what use cases talk to. They hide the encoded blob and
/// expose habits and the focus reminder switch as typed values and streams.

pub mod focus;
pub mod habits;

pub use focus::PreferencesFocusReminder;
pub use habits::{load_habits, save_habits, PreferencesHabitRepository};

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::stream::BoxStream;

use crate::domain::{Habit, HabitId};
use crate::storage::StorageError;

/// Live view of the stored habit list
///
/// Yields the current list right away and again after every store change.
/// A blob that fails to decode shows up as an `Err` item; the stream keeps
/// going.
pub type HabitStream = BoxStream<'static, Result<Vec<Habit>, StorageError>>;

/// Live view of the focus reminder switch
pub type FocusReminderStream = BoxStream<'static, Result<bool, StorageError>>;

/// Persistence contract for habits
///
/// Every mutation is a read-modify-write of the whole list. Mutations are
/// not serialized against each other, so two concurrent calls can lose one
/// update.
#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// Stream of the stored habits
    fn observe_habits(&self) -> HabitStream;

    /// Append a habit under the next free id; the input id is ignored
    async fn insert_habit(&self, habit: Habit) -> Result<HabitId, StorageError>;

    /// Replace the habit with the same id; no-op when none matches
    async fn update_habit(&self, habit: Habit) -> Result<(), StorageError>;

    /// Add `date` to the habit's completions, or remove it if present
    async fn toggle_completion(&self, habit_id: HabitId, date: NaiveDate) -> Result<(), StorageError>;

    /// Rewrite the habit's window so it reads as `progress_fraction`
    async fn set_habit_progress(
        &self,
        habit_id: HabitId,
        progress_fraction: f32,
        reference_date: NaiveDate,
    ) -> Result<(), StorageError>;
}

/// Persistence contract for the focus reminder switch
#[async_trait]
pub trait FocusReminderStore: Send + Sync {
    /// Stream of the switch; `true` when never set
    fn observe_focus_reminder_enabled(&self) -> FocusReminderStream;

    /// Current value of the switch; `true` when never set
    async fn is_focus_reminder_enabled(&self) -> Result<bool, StorageError>;

    async fn set_focus_reminder_enabled(&self, enabled: bool) -> Result<(), StorageError>;
}
