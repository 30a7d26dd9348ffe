/// Basic integration tests
use habit_tracker_core::storage::HABITS_KEY;
use habit_tracker_core::usecases::{self, AddHabitParams};
use habit_tracker_core::*;
use chrono::NaiveDate;
use tempfile::NamedTempFile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn params(name: &str) -> AddHabitParams {
    AddHabitParams {
        name: name.to_string(),
        window_days: None,
    }
}

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_tracker_basic_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let tracker = HabitTracker::new(temp_file.path().to_path_buf())
            .await
            .expect("Failed to create tracker");

        let read = usecases::add_habit(tracker.habits(), params("Read")).await.unwrap();
        let run = usecases::add_habit(tracker.habits(), params("Run")).await.unwrap();
        assert_eq!(read.habit_id, HabitId(1));
        assert_eq!(run.habit_id, HabitId(2));

        let today = date(2025, 11, 20);
        usecases::toggle_habit_completion(tracker.habits(), run.habit_id, Some(today)).await.unwrap();
        usecases::set_habit_progress(tracker.habits(), read.habit_id, 1.0, Some(today)).await.unwrap();

        let habits = usecases::current_habits(tracker.habits()).await.unwrap();
        let summary = usecases::progress_summary(&habits, today);
        assert_eq!(summary.habits[0].status, HabitStatus::Completed);
        assert_eq!(summary.habits[1].status, HabitStatus::InProgress);
        assert!(summary.has_pending_habits);
    }

    #[tokio::test]
    async fn test_database_persistence() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        {
            let tracker = HabitTracker::new(db_path.clone())
                .await
                .expect("Failed to create first tracker");
            usecases::add_habit(tracker.habits(), params("Meditar")).await.unwrap();
            tracker.focus_reminder().set_focus_reminder_enabled(false).await.unwrap();
        }

        let reopened = HabitTracker::new(db_path)
            .await
            .expect("Failed to create second tracker");
        let habits = usecases::current_habits(reopened.habits()).await.unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].name, "Meditar");
        assert!(!reopened.focus_reminder().is_focus_reminder_enabled().await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_ignores_input_id() {
        let tracker = HabitTracker::in_memory();
        let existing = vec![
            Habit::from_existing(HabitId(3), "a".to_string(), date(2025, 1, 1), Vec::new(), 7),
            Habit::from_existing(HabitId(7), "b".to_string(), date(2025, 1, 1), Vec::new(), 7),
        ];
        repository::save_habits(tracker.store().as_ref(), &existing).unwrap();

        let mut incoming = Habit::new("c".to_string(), None).unwrap();
        incoming.id = HabitId(3);
        let id = tracker.habits().insert_habit(incoming).await.unwrap();

        assert_eq!(id, HabitId(8));
    }

    #[tokio::test]
    async fn test_empty_list_leaves_key_absent() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let tracker = HabitTracker::new(temp_file.path().to_path_buf()).await.unwrap();
        usecases::add_habit(tracker.habits(), params("Temp")).await.unwrap();
        assert!(tracker.store().get_string(HABITS_KEY).unwrap().is_some());

        repository::save_habits(tracker.store().as_ref(), &[]).unwrap();

        assert_eq!(tracker.store().get_string(HABITS_KEY).unwrap(), None);
        assert!(usecases::current_habits(tracker.habits()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rename_unknown_habit_fails() {
        let tracker = HabitTracker::in_memory();
        let result = usecases::rename_habit(tracker.habits(), HabitId(5), "x".to_string()).await;
        assert!(matches!(result, Err(TrackerError::HabitNotFound { .. })));
    }

    #[tokio::test]
    async fn test_rename_keeps_completions() {
        let tracker = HabitTracker::in_memory();
        let added = usecases::add_habit(tracker.habits(), params("Read")).await.unwrap();
        let day = date(2025, 11, 20);
        usecases::toggle_habit_completion(tracker.habits(), added.habit_id, Some(day)).await.unwrap();

        usecases::rename_habit(tracker.habits(), added.habit_id, "Leer".to_string()).await.unwrap();

        let habits = usecases::current_habits(tracker.habits()).await.unwrap();
        assert_eq!(habits[0].name, "Leer");
        assert!(habits[0].is_completed_on(day));
    }

    #[tokio::test]
    async fn test_nan_progress_is_rejected() {
        let tracker = HabitTracker::in_memory();
        let result = usecases::set_habit_progress(tracker.habits(), HabitId(1), f32::NAN, None).await;
        assert!(matches!(result, Err(TrackerError::Domain(DomainError::InvalidValue { .. }))));
    }

    #[tokio::test]
    async fn test_corrupt_store_surfaces_error() {
        let tracker = HabitTracker::in_memory();
        tracker.store().set_string(HABITS_KEY, "1|UnVu|not-a-date").unwrap();

        let result = usecases::current_habits(tracker.habits()).await;
        assert!(matches!(result, Err(TrackerError::Storage(StorageError::Codec(_)))));
    }

    #[test]
    fn test_storage_interface() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let store = SqlitePreferences::new(temp_file.path().to_path_buf())
            .expect("Failed to create storage");

        // Both backends implement the same trait
        let _: &dyn PreferenceStore = &store;
        let _: &dyn PreferenceStore = &MemoryPreferences::new();
    }

    #[test]
    fn test_blocking_insert_with_tokio_test() {
        let tracker = HabitTracker::in_memory();
        let habit = Habit::new("Stretch".to_string(), Some(3)).unwrap();

        let id = tokio_test::block_on(async {
            // spawn_blocking needs a runtime; block_on provides one
            tracker.habits().insert_habit(habit).await
        });

        assert_eq!(id.unwrap(), HabitId(1));
    }
}
