/// Use case for marking a day done, or undoing it

use chrono::NaiveDate;
use crate::domain::HabitId;
use crate::repository::HabitRepository;
use crate::usecases::today;
use crate::TrackerError;

/// Toggle the completion of `habit_id` on `date` (today when omitted)
///
/// Returns the date that was toggled. An unknown habit is a no-op.
pub async fn toggle_habit_completion<R: HabitRepository + ?Sized>(
    repository: &R,
    habit_id: HabitId,
    date: Option<NaiveDate>,
) -> Result<NaiveDate, TrackerError> {
    let date = date.unwrap_or_else(today);
    repository.toggle_completion(habit_id, date).await?;
    Ok(date)
}
