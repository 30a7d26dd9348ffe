/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents something the
/// user wants to do regularly, along with validation and the two ways its
/// completion history can be edited (toggling a day, or filling the window
/// from a progress fraction).

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use chrono::{Local, NaiveDate};
use crate::domain::{DomainError, HabitId, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};

/// A habit represents something the user wants to do regularly
///
/// Completions are calendar dates kept in a set, so marking the same day
/// twice collapses to a single completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Identifier assigned by the store on insert
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Leer 20 minutos")
    pub name: String,
    /// When this habit was created (informational only)
    pub created_at: NaiveDate,
    /// Days on which the habit was marked done
    pub completions: BTreeSet<NaiveDate>,
    /// Size of the rolling evaluation window
    pub window_days: i32,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// The id stays unassigned until the habit is inserted into a store.
    pub fn new(name: String, window_days: Option<i32>) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;
        let window_days = window_days.unwrap_or(DEFAULT_WINDOW_DAYS);
        Self::validate_window(window_days)?;

        Ok(Self {
            id: HabitId::UNASSIGNED,
            name: name.trim().to_string(),
            created_at: Local::now().date_naive(),
            completions: BTreeSet::new(),
            window_days,
        })
    }

    /// Create a habit from existing data (used when decoding the store)
    ///
    /// This constructor assumes data is already validated.
    pub fn from_existing(
        id: HabitId,
        name: String,
        created_at: NaiveDate,
        completions: impl IntoIterator<Item = NaiveDate>,
        window_days: i32,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
            completions: completions.into_iter().collect(),
            window_days,
        }
    }

    /// Replace the display name, validating it first
    pub fn rename(&mut self, name: String) -> Result<(), DomainError> {
        Self::validate_name(&name)?;
        self.name = name.trim().to_string();
        Ok(())
    }

    /// Whether the habit was marked done on `date`
    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completions.contains(&date)
    }

    /// Mark `date` done, or undo it if it already was
    pub fn toggle_completion(&mut self, date: NaiveDate) {
        if !self.completions.remove(&date) {
            self.completions.insert(date);
        }
    }

    /// First day of the window that ends at `reference_date`
    ///
    /// Saturates at the earliest representable date instead of overflowing.
    pub fn window_start(&self, reference_date: NaiveDate) -> NaiveDate {
        let span = i64::from(self.window_days.max(1)) - 1;
        reference_date
            .checked_sub_signed(chrono::Duration::days(span))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Rebuild the completion history so the window reads as `fraction`
    ///
    /// The progress bar acts as a slider: the window is filled with the most
    /// recent `floor(fraction * window_days)` days ending at `reference_date`.
    /// Completions before the window are kept, everything else is replaced.
    pub fn fill_window(&mut self, fraction: f32, reference_date: NaiveDate) {
        let clamped = fraction.clamp(0.0, 1.0);
        let window_days = self.window_days.max(1);
        // NaN saturates to 0 in the float-to-int cast
        let filled_days = ((clamped * window_days as f32) as i32).clamp(0, window_days);
        let window_start = self.window_start(reference_date);

        let mut result: BTreeSet<NaiveDate> = self
            .completions
            .iter()
            .filter(|date| **date < window_start)
            .copied()
            .collect();

        let mut day = reference_date;
        for _ in 0..filled_days {
            result.insert(day);
            match day.pred_opt() {
                Some(previous) => day = previous,
                None => break,
            }
        }

        self.completions = result;
    }

    // Validation helper methods

    /// Validate habit name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if trimmed.chars().count() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string()
            ));
        }

        Ok(())
    }

    /// Validate the rolling window size for a new habit
    fn validate_window(window_days: i32) -> Result<(), DomainError> {
        if !(1..=MAX_WINDOW_DAYS).contains(&window_days) {
            return Err(DomainError::InvalidWindow(format!(
                "Window must be between 1 and {} days, got {}",
                MAX_WINDOW_DAYS, window_days
            )));
        }
        Ok(())
    }
}
