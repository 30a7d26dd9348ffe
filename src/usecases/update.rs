/// Use case for renaming an existing habit

use crate::domain::HabitId;
use crate::repository::HabitRepository;
use crate::usecases::current_habits;
use crate::TrackerError;

/// Rename `habit_id`, failing when it doesn't exist
///
/// The rename goes through `update_habit`, so the rest of the record
/// (completions included) is written back as it was read.
pub async fn rename_habit<R: HabitRepository + ?Sized>(
    repository: &R,
    habit_id: HabitId,
    name: String,
) -> Result<(), TrackerError> {
    let mut habit = current_habits(repository)
        .await?
        .into_iter()
        .find(|habit| habit.id == habit_id)
        .ok_or(TrackerError::HabitNotFound { habit_id })?;

    habit.rename(name)?;
    repository.update_habit(habit).await?;
    Ok(())
}
