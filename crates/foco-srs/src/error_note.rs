use chrono::NaiveDate;

use crate::flashcard::add_days;

/// Days between error notebook reviews, indexed by the number of reviews
/// already recorded minus one. Capped at 30 days from the fifth review on.
pub const ERROR_NOTE_LADDER: [u32; 5] = [1, 3, 7, 14, 30];

/// Date on which an error note is next due.
///
/// Returns `None` when the note has never been reviewed, which means it is
/// due right away.
pub fn error_note_next_due(review_dates: &[NaiveDate]) -> Option<NaiveDate> {
    let last = *review_dates.last()?;
    let index = (review_dates.len() - 1).min(ERROR_NOTE_LADDER.len() - 1);
    Some(add_days(last, ERROR_NOTE_LADDER[index]))
}

/// An error note is due when it was never reviewed or its next due date has arrived.
pub fn is_error_note_due(review_dates: &[NaiveDate], today: NaiveDate) -> bool {
    error_note_next_due(review_dates).is_none_or(|due| due <= today)
}

/// Append today's review. The history is append-only; the ladder position
/// follows from its length on the next due check.
pub fn record_error_note_review(review_dates: &mut Vec<NaiveDate>, today: NaiveDate) {
    review_dates.push(today);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_history_is_due() {
        assert_eq!(error_note_next_due(&[]), None);
        assert!(is_error_note_due(&[], date(2024, 1, 1)));
    }

    #[test]
    fn test_second_review_waits_three_days() {
        let mut dates = vec![date(2024, 1, 1)];
        record_error_note_review(&mut dates, date(2024, 1, 2));

        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 2)]);
        assert_eq!(error_note_next_due(&dates), Some(date(2024, 1, 5)));
        assert!(!is_error_note_due(&dates, date(2024, 1, 4)));
        assert!(is_error_note_due(&dates, date(2024, 1, 5)));
    }

    #[test]
    fn test_ladder_steps() {
        let start = date(2024, 1, 1);
        let mut dates = Vec::new();
        let expected = [1, 3, 7, 14, 30];
        for &step in &expected {
            dates.push(start);
            let due = error_note_next_due(&dates).unwrap();
            assert_eq!((due - start).num_days(), i64::from(step));
        }
    }

    #[test]
    fn test_five_or_more_reviews_use_thirty_days() {
        let last = date(2024, 2, 10);
        for count in 5..12 {
            let mut dates = vec![date(2024, 1, 1); count - 1];
            dates.push(last);
            assert_eq!(error_note_next_due(&dates), Some(date(2024, 3, 11)));
        }
    }

    #[test]
    fn test_only_last_date_matters() {
        let a = [date(2024, 1, 1), date(2024, 1, 20)];
        let b = [date(2023, 6, 1), date(2024, 1, 20)];
        assert_eq!(error_note_next_due(&a), error_note_next_due(&b));
    }
}
