/// Habit repository backed by a preference store
///
/// The whole habit list lives under [`HABITS_KEY`] as one encoded string.
/// Each operation loads it, edits the decoded list, and writes it back.

use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDate;
use futures::StreamExt;
use tokio_stream::wrappers::WatchStream;

use crate::domain::{Habit, HabitId};
use crate::repository::{HabitRepository, HabitStream};
use crate::storage::{decode_habits, encode_habits, PreferenceStore, StorageError, HABITS_KEY};

/// Read and decode the stored habit list; an absent key is an empty list
pub fn load_habits<S: PreferenceStore + ?Sized>(store: &S) -> Result<Vec<Habit>, StorageError> {
    let serialized = store.get_string(HABITS_KEY)?.unwrap_or_default();
    Ok(decode_habits(&serialized)?)
}

/// Encode and store the habit list; an empty list removes the key
pub fn save_habits<S: PreferenceStore + ?Sized>(store: &S, habits: &[Habit]) -> Result<(), StorageError> {
    if habits.is_empty() {
        store.remove(HABITS_KEY)
    } else {
        store.set_string(HABITS_KEY, &encode_habits(habits))
    }
}

/// [`HabitRepository`] over any [`PreferenceStore`]
pub struct PreferencesHabitRepository<S> {
    store: Arc<S>,
}

impl<S: PreferenceStore + 'static> PreferencesHabitRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Run one read-modify-write cycle on the blocking pool
    ///
    /// `edit` returns the list to persist plus a value handed back to the
    /// caller. Nothing is written when `edit` fails.
    async fn modify<T, F>(&self, edit: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(Vec<Habit>) -> Result<(Vec<Habit>, T), StorageError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let current = load_habits(store.as_ref())?;
            let (updated, output) = edit(current)?;
            save_habits(store.as_ref(), &updated)?;
            Ok::<T, StorageError>(output)
        })
        .await?
    }
}

/// Apply `edit` to every habit with `habit_id`, reporting whether any existed
///
/// Ids are unique unless the stored blob was written by hand, in which case
/// all copies are edited alike.
fn edit_habit(habits: &mut [Habit], habit_id: HabitId, mut edit: impl FnMut(&mut Habit)) -> bool {
    let mut found = false;
    for habit in habits.iter_mut().filter(|habit| habit.id == habit_id) {
        edit(habit);
        found = true;
    }
    found
}

#[async_trait]
impl<S: PreferenceStore + 'static> HabitRepository for PreferencesHabitRepository<S> {
    fn observe_habits(&self) -> HabitStream {
        let store = Arc::clone(&self.store);
        WatchStream::new(self.store.subscribe())
            .then(move |_generation| {
                let store = Arc::clone(&store);
                async move {
                    let habits = tokio::task::spawn_blocking(move || load_habits(store.as_ref())).await??;
                    Ok::<_, StorageError>(habits)
                }
            })
            .boxed()
    }

    async fn insert_habit(&self, habit: Habit) -> Result<HabitId, StorageError> {
        let id = self
            .modify(move |mut habits| {
                let max = habits.iter().map(|h| h.id).max();
                let next_id = HabitId::next_after(max)
                    .ok_or(StorageError::IdsExhausted { max: max.unwrap_or_default() })?;
                habits.push(Habit { id: next_id, ..habit });
                Ok((habits, next_id))
            })
            .await?;

        tracing::debug!("Inserted habit {}", id);
        Ok(id)
    }

    async fn update_habit(&self, habit: Habit) -> Result<(), StorageError> {
        let habit_id = habit.id;
        let found = self
            .modify(move |mut habits| {
                let found = edit_habit(&mut habits, habit.id, |existing| *existing = habit.clone());
                Ok((habits, found))
            })
            .await?;

        if found {
            tracing::debug!("Updated habit {}", habit_id);
        } else {
            tracing::debug!("Update ignored, no habit {}", habit_id);
        }
        Ok(())
    }

    async fn toggle_completion(&self, habit_id: HabitId, date: NaiveDate) -> Result<(), StorageError> {
        let found = self
            .modify(move |mut habits| {
                let found = edit_habit(&mut habits, habit_id, |habit| habit.toggle_completion(date));
                Ok((habits, found))
            })
            .await?;

        tracing::debug!("Toggled {} for habit {} (found: {})", date, habit_id, found);
        Ok(())
    }

    async fn set_habit_progress(
        &self,
        habit_id: HabitId,
        progress_fraction: f32,
        reference_date: NaiveDate,
    ) -> Result<(), StorageError> {
        let found = self
            .modify(move |mut habits| {
                let found = edit_habit(&mut habits, habit_id, |habit| {
                    habit.fill_window(progress_fraction, reference_date)
                });
                Ok((habits, found))
            })
            .await?;

        tracing::debug!(
            "Set progress of habit {} to {:.3} on {} (found: {})",
            habit_id, progress_fraction, reference_date, found
        );
        Ok(())
    }
}
