/// Tests for the stored text format
use habit_tracker_core::storage::{decode_habits, encode_habits, CodecError};
use habit_tracker_core::*;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn habit(id: i64, name: &str, completions: Vec<NaiveDate>) -> Habit {
    Habit::from_existing(HabitId(id), name.to_string(), date(2025, 11, 1), completions, DEFAULT_WINDOW_DAYS)
}

#[cfg(test)]
mod codec_tests {
    use super::*;

    #[test]
    fn test_round_trip_keeps_id_name_and_dates() {
        let habits = vec![
            habit(1, "Correr 🏃‍♀️", vec![date(2025, 11, 18), date(2025, 11, 20)]),
            habit(2, "Привычка|;;,", vec![]),
            habit(10, "", vec![date(2000, 1, 1)]),
        ];

        let decoded = decode_habits(&encode_habits(&habits)).unwrap();

        assert_eq!(decoded.len(), habits.len());
        for (original, restored) in habits.iter().zip(&decoded) {
            assert_eq!(restored.id, original.id);
            assert_eq!(restored.name, original.name);
            assert_eq!(restored.completions, original.completions);
        }
    }

    #[test]
    fn test_malformed_record_is_isolated() {
        let blob = "1|UnVu|2025-11-20;;2|TGVlcg==;;3|V2Fsaw==|;;4|U3dpbQ==|2025-11-19";
        let decoded = decode_habits(blob).unwrap();

        let ids: Vec<i64> = decoded.iter().map(|h| h.id.value()).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_malformed_date_fails_decode() {
        let blob = "1|UnVu|2025-11-20;;2|TGVlcg==|2025-02-30;;3|V2Fsaw==|";
        assert!(matches!(decode_habits(blob), Err(CodecError::InvalidDate { .. })));
    }

    #[test]
    fn test_empty_blob_is_empty_list() {
        assert!(decode_habits("").unwrap().is_empty());
        assert_eq!(encode_habits(&[]), "");
    }
}
