use std::cmp::Ordering;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::Difficulty;

/// Result of scheduling one flashcard review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewOutcome {
    /// Interval picked from the rating's ladder
    pub interval_days: u32,
    /// `today + interval_days`
    pub next_review: NaiveDate,
    /// Whether the rating counts as a correct answer
    pub is_correct: bool,
}

/// Running correct/wrong counters of a flashcard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewCounters {
    pub correct_count: u32,
    pub wrong_count: u32,
}

impl ReviewCounters {
    pub const fn new(correct_count: u32, wrong_count: u32) -> Self {
        Self {
            correct_count,
            wrong_count,
        }
    }

    /// Bump exactly one counter according to the outcome.
    #[must_use]
    pub const fn record(self, outcome: &ReviewOutcome) -> Self {
        if outcome.is_correct {
            Self {
                correct_count: self.correct_count.saturating_add(1),
                wrong_count: self.wrong_count,
            }
        } else {
            Self {
                correct_count: self.correct_count,
                wrong_count: self.wrong_count.saturating_add(1),
            }
        }
    }
}

/// Compute the next interval and review date of a flashcard.
///
/// # Arguments
///
/// * `current_interval_days` - The card's interval before this review (new cards carry 1)
/// * `difficulty` - The rating the student gave
/// * `today` - The review date, in the study timezone
///
/// # Algorithm
///
/// 1. Pick the ladder of the given rating.
/// 2. Find `current_interval_days` in it; a value that is not on the ladder is
///    treated as the first rung.
/// 3. A correct rating (easy, medium) climbs one rung, capped at the top. A wrong
///    rating (hard, very hard) drops back to the first rung.
/// 4. The next review is `today` plus the interval on that rung.
///
/// Every ladder starts at one day, so the next review is always in the future.
pub fn compute_next_review(
    current_interval_days: u32,
    difficulty: Difficulty,
    today: NaiveDate,
) -> ReviewOutcome {
    let ladder = difficulty.ladder();
    let is_correct = difficulty.is_correct();

    let current_index = ladder
        .iter()
        .position(|&days| days == current_interval_days)
        .unwrap_or(0);

    let index = if is_correct {
        (current_index + 1).min(ladder.len() - 1)
    } else {
        0
    };

    let interval_days = ladder[index];

    ReviewOutcome {
        interval_days,
        next_review: add_days(today, interval_days),
        is_correct,
    }
}

/// A card with no scheduled review is always due; otherwise it is due on or
/// after its review date.
pub fn is_flashcard_due(next_review: Option<NaiveDate>, today: NaiveDate) -> bool {
    next_review.is_none_or(|date| date <= today)
}

/// Due-queue ordering: never-reviewed cards first, then by ascending review date.
pub fn due_queue_order(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(&b),
    }
}

/// Keep the due items and order them for review.
///
/// The sort is stable, so items with the same review date keep their input order.
pub fn build_due_queue<T, I, F>(items: I, today: NaiveDate, next_review: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> Option<NaiveDate>,
{
    let mut queue: Vec<T> = items
        .into_iter()
        .filter(|item| is_flashcard_due(next_review(item), today))
        .collect();
    queue.sort_by(|a, b| due_queue_order(next_review(a), next_review(b)));
    queue
}

pub(crate) fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}
