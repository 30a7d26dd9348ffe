/// Use case for creating new habits

use serde::{Deserialize, Serialize};
use crate::domain::{Habit, HabitId};
use crate::repository::HabitRepository;
use crate::TrackerError;

/// Parameters for creating a new habit
#[derive(Debug, Clone, Deserialize)]
pub struct AddHabitParams {
    pub name: String,
    /// Defaults to a 7-day window
    pub window_days: Option<i32>,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct AddHabitResponse {
    pub habit_id: HabitId,
    pub message: String,
}

/// Validate and insert a new habit
pub async fn add_habit<R: HabitRepository + ?Sized>(
    repository: &R,
    params: AddHabitParams,
) -> Result<AddHabitResponse, TrackerError> {
    let habit = Habit::new(params.name, params.window_days)?;
    let name = habit.name.clone();
    let window_days = habit.window_days;

    let habit_id = repository.insert_habit(habit).await?;

    Ok(AddHabitResponse {
        habit_id,
        message: format!("Created habit '{}' (#{}) with a {}-day window", name, habit_id, window_days),
    })
}
