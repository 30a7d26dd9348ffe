/// Use case for driving a habit's progress like a slider

use chrono::NaiveDate;
use crate::domain::{DomainError, HabitId};
use crate::repository::HabitRepository;
use crate::usecases::today;
use crate::TrackerError;

/// Set the progress of `habit_id` to `progress_fraction` as of `reference_date`
///
/// The fraction is clamped to [0, 1] by the repository; NaN is rejected here
/// because it has no meaningful position on the slider.
pub async fn set_habit_progress<R: HabitRepository + ?Sized>(
    repository: &R,
    habit_id: HabitId,
    progress_fraction: f32,
    reference_date: Option<NaiveDate>,
) -> Result<(), TrackerError> {
    if progress_fraction.is_nan() {
        return Err(DomainError::InvalidValue {
            message: "Progress fraction must be a number".to_string(),
        }
        .into());
    }

    let reference_date = reference_date.unwrap_or_else(today);
    repository
        .set_habit_progress(habit_id, progress_fraction, reference_date)
        .await?;
    Ok(())
}
