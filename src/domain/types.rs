/// Core types used throughout the domain layer
///
/// This module defines the habit identifier and the shared constants that
/// Habit, HabitProgress and the codec agree on.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

/// Default size of the rolling evaluation window, in days
pub const DEFAULT_WINDOW_DAYS: i32 = 7;

/// Largest window a new habit may be created with
pub const MAX_WINDOW_DAYS: i32 = 365;

/// Unique identifier for a habit
///
/// This is a wrapper around the 64-bit id assigned by the store on insert, so
/// a habit id can't be confused with a day count or a window size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub i64);

impl HabitId {
    /// Placeholder id carried by habits that have not been inserted yet
    pub const UNASSIGNED: HabitId = HabitId(0);

    /// The id a store hands out after `max`
    ///
    /// Returns `None` once `max` is `i64::MAX` and no larger id exists.
    pub fn next_after(max: Option<HabitId>) -> Option<Self> {
        max.map(|id| id.0).unwrap_or(0).checked_add(1).map(Self)
    }

    /// Get the raw integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HabitId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<i64> for HabitId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Format of every stored or user supplied date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date written exactly as `YYYY-MM-DD`
///
/// chrono alone also takes single digit fields, a sign or leading blanks, so
/// the shape is checked before the calendar is.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Parse a `YYYY-MM-DD` calendar date supplied by a caller
pub fn parse_date(s: &str) -> Result<NaiveDate, crate::domain::DomainError> {
    parse_iso_date(s).ok_or_else(|| {
        crate::domain::DomainError::InvalidDate(format!("'{}', expected YYYY-MM-DD", s))
    })
}
