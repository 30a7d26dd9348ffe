/// Use cases that read habits and derive progress from them
///
/// Progress is never stored; every emission of the habit stream is mapped
/// through the calculator again. With no explicit reference date the local
/// "today" is taken at each emission, so a long-lived stream rolls over at
/// midnight on its next change.

use chrono::NaiveDate;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::Serialize;

use crate::domain::{
    has_pending_habits, overall_progress, weekly_summary, DaySummary, Habit, HabitProgress,
};
use crate::repository::{HabitRepository, HabitStream};
use crate::storage::StorageError;
use crate::usecases::today;
use crate::TrackerError;

/// Live per-habit progress, in store order
pub type ProgressStream = BoxStream<'static, Result<Vec<HabitProgress>, StorageError>>;

/// Everything the progress screen shows for one reference date
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSummary {
    pub reference_date: NaiveDate,
    pub habits: Vec<HabitProgress>,
    pub overall_progress: f32,
    pub has_pending_habits: bool,
    pub weekly: Vec<DaySummary>,
}

/// Stream of the stored habits
pub fn observe_habits<R: HabitRepository + ?Sized>(repository: &R) -> HabitStream {
    repository.observe_habits()
}

/// One-shot read of the stored habits
pub async fn current_habits<R: HabitRepository + ?Sized>(repository: &R) -> Result<Vec<Habit>, TrackerError> {
    match repository.observe_habits().next().await {
        Some(habits) => Ok(habits?),
        None => Ok(Vec::new()),
    }
}

/// Stream of each habit's progress
pub fn observe_habit_progress<R: HabitRepository + ?Sized>(
    repository: &R,
    reference_date: Option<NaiveDate>,
) -> ProgressStream {
    repository
        .observe_habits()
        .map(move |habits| {
            let date = reference_date.unwrap_or_else(today);
            habits.map(|habits| habits.iter().map(|habit| habit.progress_on(date)).collect::<Vec<_>>())
        })
        .boxed()
}

/// Stream of the mean progress across all habits
pub fn observe_overall_progress<R: HabitRepository + ?Sized>(
    repository: &R,
    reference_date: Option<NaiveDate>,
) -> BoxStream<'static, Result<f32, StorageError>> {
    observe_habit_progress(repository, reference_date)
        .map(|progresses| progresses.map(|progresses| overall_progress(&progresses)))
        .boxed()
}

/// Stream telling whether any habit is still incomplete
///
/// This is what the night reminder collaborator listens to.
pub fn observe_pending_habits<R: HabitRepository + ?Sized>(
    repository: &R,
    reference_date: Option<NaiveDate>,
) -> BoxStream<'static, Result<bool, StorageError>> {
    observe_habit_progress(repository, reference_date)
        .map(|progresses| progresses.map(|progresses| has_pending_habits(&progresses)))
        .boxed()
}

/// Build the full progress view of `habits` on `reference_date`
pub fn progress_summary(habits: &[Habit], reference_date: NaiveDate) -> ProgressSummary {
    let progresses: Vec<HabitProgress> =
        habits.iter().map(|habit| habit.progress_on(reference_date)).collect();

    ProgressSummary {
        reference_date,
        overall_progress: overall_progress(&progresses),
        has_pending_habits: has_pending_habits(&progresses),
        weekly: weekly_summary(habits, reference_date),
        habits: progresses,
    }
}
