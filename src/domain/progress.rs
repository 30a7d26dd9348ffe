/// Progress calculation for habits
///
/// This module turns a habit's completion history into a completion fraction
/// over its rolling window, plus the aggregate views the presentation layer
/// shows (overall average, pending check, weekly summary).

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::{Habit, HabitId};

/// Number of days shown in the weekly summary
pub const WEEKLY_SUMMARY_DAYS: usize = 7;

/// Coarse classification of a progress fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HabitStatus {
    /// Every day of the window is done
    Completed,
    /// Some, but not all, days of the window are done
    InProgress,
    /// Nothing done in the window (or nothing trackable)
    Pending,
}

impl HabitStatus {
    /// Classify a fraction that is already clamped to [0, 1]
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction >= 1.0 {
            HabitStatus::Completed
        } else if fraction > 0.0 {
            HabitStatus::InProgress
        } else {
            HabitStatus::Pending
        }
    }

    /// Get the display name for this status
    pub fn display_name(&self) -> &'static str {
        match self {
            HabitStatus::Completed => "completed",
            HabitStatus::InProgress => "in progress",
            HabitStatus::Pending => "pending",
        }
    }
}

/// Derived progress of one habit; never persisted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HabitProgress {
    pub habit_id: HabitId,
    /// Completed days in the window divided by the window size, in [0, 1]
    pub progress_fraction: f32,
    pub status: HabitStatus,
}

/// Average progress of all habits on one day of the weekly summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub average_fraction: f32,
}

/// Compute a habit's progress over the window ending at `reference_date`
///
/// A non-positive window means nothing is trackable and yields `Pending`.
pub fn compute_progress(habit: &Habit, reference_date: NaiveDate) -> HabitProgress {
    if habit.window_days <= 0 {
        return HabitProgress {
            habit_id: habit.id,
            progress_fraction: 0.0,
            status: HabitStatus::Pending,
        };
    }

    let window_start = habit.window_start(reference_date);
    let completed_in_window = habit
        .completions
        .range(window_start..=reference_date)
        .count();

    let fraction = (completed_in_window as f32 / habit.window_days as f32).clamp(0.0, 1.0);

    HabitProgress {
        habit_id: habit.id,
        progress_fraction: fraction,
        status: HabitStatus::from_fraction(fraction),
    }
}

impl Habit {
    /// Progress of this habit on `reference_date`
    pub fn progress_on(&self, reference_date: NaiveDate) -> HabitProgress {
        compute_progress(self, reference_date)
    }
}

/// Mean progress fraction across habits, 0 when there are none
pub fn overall_progress(progresses: &[HabitProgress]) -> f32 {
    if progresses.is_empty() {
        return 0.0;
    }
    let total: f64 = progresses.iter().map(|p| f64::from(p.progress_fraction)).sum();
    (total / progresses.len() as f64) as f32
}

/// Whether any habit still has work left in its window
pub fn has_pending_habits(progresses: &[HabitProgress]) -> bool {
    progresses.iter().any(|p| p.status != HabitStatus::Completed)
}

/// Average progress for each of the seven days ending at `reference_date`
///
/// Entries are ordered oldest first. Each day evaluates every habit as if
/// that day were the reference date.
pub fn weekly_summary(habits: &[Habit], reference_date: NaiveDate) -> Vec<DaySummary> {
    (0..WEEKLY_SUMMARY_DAYS as i64)
        .rev()
        .filter_map(|offset| reference_date.checked_sub_signed(chrono::Duration::days(offset)))
        .map(|date| {
            let progresses: Vec<HabitProgress> =
                habits.iter().map(|habit| habit.progress_on(date)).collect();
            DaySummary {
                date,
                average_fraction: overall_progress(&progresses),
            }
        })
        .collect()
}
