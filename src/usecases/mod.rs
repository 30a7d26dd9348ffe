/// Use cases consumed by the presentation layer
///
/// Each use case is a small function over a [`HabitRepository`] or
/// [`FocusReminderStore`](crate::repository::FocusReminderStore). They add
/// input validation and the "today" default on top of the repository calls,
/// and derive progress views from the habit stream.

pub mod add;
pub mod observe;
pub mod progress;
pub mod toggle;
pub mod update;

// Re-export use case functions for easy access
pub use add::*;
pub use observe::*;
pub use progress::*;
pub use toggle::*;
pub use update::*;

use chrono::{Local, NaiveDate};

/// Today's date on the local calendar
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
