/// Text encoding of the habit list
///
/// The whole habit list is persisted as one string under a single key:
///
/// ```text
/// <id>|<base64 name>|<date>,<date>,...;;<id>|<base64 name>|...
/// ```
///
/// Names are base64 encoded so any Unicode (including the delimiters) survives.
/// Creation date and window size are not part of the format; decoded habits get
/// today's date and the default window.

use base64::{engine::general_purpose, Engine as _};
use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::domain::{parse_iso_date, Habit, HabitId, DATE_FORMAT, DEFAULT_WINDOW_DAYS};

/// Separator between habit records
pub const RECORD_SEPARATOR: &str = ";;";

/// Separator between the fields of one record
pub const FIELD_SEPARATOR: &str = "|";

/// Separator between completion dates
pub const DATE_SEPARATOR: &str = ",";

/// Errors that make a whole blob unreadable
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Invalid completion date '{token}' in habit {habit_id}, expected YYYY-MM-DD")]
    InvalidDate { habit_id: HabitId, token: String },
}

/// Serialize habits into the stored text form, preserving order
pub fn encode_habits(habits: &[Habit]) -> String {
    habits
        .iter()
        .map(encode_habit)
        .collect::<Vec<_>>()
        .join(RECORD_SEPARATOR)
}

fn encode_habit(habit: &Habit) -> String {
    let encoded_name = general_purpose::STANDARD.encode(habit.name.as_bytes());
    let dates = habit
        .completions
        .iter()
        .map(|date| date.format(DATE_FORMAT).to_string())
        .collect::<Vec<_>>()
        .join(DATE_SEPARATOR);

    format!("{}{sep}{}{sep}{}", habit.id, encoded_name, dates, sep = FIELD_SEPARATOR)
}

/// Rebuild habits from the stored text form
///
/// Records with a bad shape or id are skipped, and names that aren't valid
/// base64 are kept verbatim. A malformed date fails the whole decode.
pub fn decode_habits(s: &str) -> Result<Vec<Habit>, CodecError> {
    decode_habits_created_on(s, Local::now().date_naive())
}

/// Same as [`decode_habits`] with an explicit creation date for the results
pub fn decode_habits_created_on(s: &str, created_at: NaiveDate) -> Result<Vec<Habit>, CodecError> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut habits = Vec::new();
    for record in s.split(RECORD_SEPARATOR) {
        if let Some(habit) = decode_habit(record, created_at)? {
            habits.push(habit);
        }
    }
    Ok(habits)
}

fn decode_habit(record: &str, created_at: NaiveDate) -> Result<Option<Habit>, CodecError> {
    let parts: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
    if parts.len() < 3 {
        tracing::warn!("Skipping habit record with {} field(s)", parts.len());
        return Ok(None);
    }

    let id = match parts[0].parse::<HabitId>() {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Skipping habit record with invalid id '{}': {}", parts[0], e);
            return Ok(None);
        }
    };

    let name = decode_name(parts[1]);

    let dates_part = parts[2];
    let mut completions = Vec::new();
    if !dates_part.trim().is_empty() {
        for token in dates_part.split(DATE_SEPARATOR) {
            let date = parse_iso_date(token).ok_or_else(|| CodecError::InvalidDate {
                habit_id: id,
                token: token.to_string(),
            })?;
            completions.push(date);
        }
    }

    Ok(Some(Habit::from_existing(id, name, created_at, completions, DEFAULT_WINDOW_DAYS)))
}

/// Decode a base64 name, falling back to the raw field
///
/// Decoded bytes that aren't UTF-8 are converted lossily rather than
/// discarded.
fn decode_name(field: &str) -> String {
    match general_purpose::STANDARD.decode(field) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::debug!("Habit name is not base64 ({}), keeping it verbatim", e);
            field.to_string()
        }
    }
}
