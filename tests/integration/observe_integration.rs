/// Integration tests for the live habit and progress streams
use habit_tracker_core::usecases::{self, AddHabitParams};
use habit_tracker_core::*;
use chrono::NaiveDate;
use futures::StreamExt;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[cfg(test)]
mod observe_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_progress_stream_follows_changes() {
        let tracker = HabitTracker::in_memory();
        let reference = date(2025, 11, 20);
        let mut progress = usecases::observe_habit_progress(tracker.habits(), Some(reference));
        let mut overall = usecases::observe_overall_progress(tracker.habits(), Some(reference));
        let mut pending = usecases::observe_pending_habits(tracker.habits(), Some(reference));

        assert!(progress.next().await.unwrap().unwrap().is_empty());
        assert_eq!(overall.next().await.unwrap().unwrap(), 0.0);
        assert!(!pending.next().await.unwrap().unwrap());

        let added = usecases::add_habit(
            tracker.habits(),
            AddHabitParams { name: "Agua".to_string(), window_days: Some(2) },
        )
        .await
        .unwrap();

        let after_add = progress.next().await.unwrap().unwrap();
        assert_eq!(after_add.len(), 1);
        assert_eq!(after_add[0].status, HabitStatus::Pending);
        assert!(pending.next().await.unwrap().unwrap());

        usecases::set_habit_progress(tracker.habits(), added.habit_id, 1.0, Some(reference))
            .await
            .unwrap();

        // Two writes happened since this stream last yielded; it wakes once
        // and decodes the latest blob
        assert_eq!(overall.next().await.unwrap().unwrap(), 1.0);
        let after_fill = progress.next().await.unwrap().unwrap();
        assert_eq!(after_fill[0].status, HabitStatus::Completed);
        assert!(!pending.next().await.unwrap().unwrap());
    }

    #[tokio::test]
    async fn test_stream_reports_corrupt_blob_and_recovers() {
        let tracker = HabitTracker::in_memory();
        let mut habits = usecases::observe_habits(tracker.habits());
        assert!(habits.next().await.unwrap().unwrap().is_empty());

        tracker
            .store()
            .set_string(storage::HABITS_KEY, "1|UnVu|2025-13-40")
            .unwrap();
        assert!(habits.next().await.unwrap().is_err());

        tracker
            .store()
            .set_string(storage::HABITS_KEY, "1|UnVu|2025-11-20")
            .unwrap();
        let recovered = habits.next().await.unwrap().unwrap();
        assert_eq!(recovered[0].name, "Run");
    }

    #[tokio::test]
    async fn test_focus_reminder_stream() {
        let tracker = HabitTracker::in_memory();
        let mut enabled = tracker.focus_reminder().observe_focus_reminder_enabled();

        assert!(enabled.next().await.unwrap().unwrap());

        tracker.focus_reminder().set_focus_reminder_enabled(false).await.unwrap();
        assert!(!enabled.next().await.unwrap().unwrap());
    }
}
