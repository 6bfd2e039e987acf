use chrono::NaiveDate;
use foco_db::{
    models::{Flashcard, FlashcardReviewUpdate},
    repositories::flashcard,
};
use foco_srs::{Difficulty, ReviewOutcome, compute_next_review};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    metrics::{ReviewKind, record_review},
};

/// The card after the review, and what the scheduler decided.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResult {
    pub flashcard: Flashcard,
    pub outcome: ReviewOutcome,
}

/// Apply one rating to a card and persist the new review state.
///
/// The row is locked for the read-modify-write, so concurrent reviews of the
/// same card are applied one after the other and neither counter bump is lost.
pub async fn review_flashcard(
    pool: &PgPool,
    user_id: Uuid,
    flashcard_id: Uuid,
    difficulty: Difficulty,
    today: NaiveDate,
) -> Result<ReviewResult, ApiError> {
    let mut tx = pool.begin().await?;

    let card: Flashcard = flashcard::find_flashcard_for_update(&mut *tx, user_id, flashcard_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Flashcard"))?
        .try_into()?;

    let outcome = compute_next_review(card.interval_days, difficulty, today);
    let update = FlashcardReviewUpdate {
        counters: card.counters().record(&outcome),
        interval_days: outcome.interval_days,
        next_review: outcome.next_review,
        difficulty,
    };

    let row = flashcard::apply_flashcard_review(&mut *tx, user_id, flashcard_id, &update).await?;
    tx.commit().await?;

    record_review(
        ReviewKind::Flashcard,
        if outcome.is_correct { "correct" } else { "wrong" },
    );
    tracing::info!(
        %user_id,
        %flashcard_id,
        %difficulty,
        interval_days = outcome.interval_days,
        next_review = %outcome.next_review,
        "flashcard reviewed"
    );

    Ok(ReviewResult {
        flashcard: row.try_into()?,
        outcome,
    })
}
