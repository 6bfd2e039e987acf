use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{FlashcardChanges, FlashcardReviewUpdate, FlashcardRow, NewFlashcard};

/// Card counts of one subject.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubjectCardCount {
    pub subject_id: Uuid,
    pub total: i64,
    pub due: i64,
}

fn to_i32(value: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

pub async fn list_flashcards<'e, E>(
    executor: E,
    user_id: Uuid,
    subject_id: Option<Uuid>,
) -> Result<Vec<FlashcardRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, subject_id, content, front, back, correct_count, wrong_count,
                   interval_days, next_review, last_difficulty, created_at, updated_at
            FROM flashcards
            WHERE user_id = $1 AND ($2::uuid IS NULL OR subject_id = $2)
            ORDER BY created_at, id
        "#,
    )
    .bind(user_id)
    .bind(subject_id)
    .fetch_all(executor)
    .await
}

/// The review queue of one subject: due cards, never-reviewed first, then by
/// ascending review date. Ties keep creation order.
pub async fn list_due_flashcards<'e, E>(
    executor: E,
    user_id: Uuid,
    subject_id: Uuid,
    today: NaiveDate,
    limit: i64,
) -> Result<Vec<FlashcardRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, subject_id, content, front, back, correct_count, wrong_count,
                   interval_days, next_review, last_difficulty, created_at, updated_at
            FROM flashcards
            WHERE user_id = $1
                AND subject_id = $2
                AND (next_review IS NULL OR next_review <= $3)
            ORDER BY next_review NULLS FIRST, created_at, id
            LIMIT $4
        "#,
    )
    .bind(user_id)
    .bind(subject_id)
    .bind(today)
    .bind(limit)
    .fetch_all(executor)
    .await
}

/// Card counts for every subject of the user that owns at least one card.
pub async fn count_cards_by_subject<'e, E>(
    executor: E,
    user_id: Uuid,
    today: NaiveDate,
) -> Result<Vec<SubjectCardCount>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT subject_id,
                   COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE next_review IS NULL OR next_review <= $2) AS due
            FROM flashcards
            WHERE user_id = $1
            GROUP BY subject_id
        "#,
    )
    .bind(user_id)
    .bind(today)
    .fetch_all(executor)
    .await
}

pub async fn find_flashcard<'e, E>(
    executor: E,
    user_id: Uuid,
    flashcard_id: Uuid,
) -> Result<Option<FlashcardRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, subject_id, content, front, back, correct_count, wrong_count,
                   interval_days, next_review, last_difficulty, created_at, updated_at
            FROM flashcards
            WHERE user_id = $1 AND id = $2
        "#,
    )
    .bind(user_id)
    .bind(flashcard_id)
    .fetch_optional(executor)
    .await
}

/// Same as [`find_flashcard`] but locks the row until the transaction ends, so
/// two concurrent reviews of one card apply one after the other.
pub async fn find_flashcard_for_update<'e, E>(
    executor: E,
    user_id: Uuid,
    flashcard_id: Uuid,
) -> Result<Option<FlashcardRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, subject_id, content, front, back, correct_count, wrong_count,
                   interval_days, next_review, last_difficulty, created_at, updated_at
            FROM flashcards
            WHERE user_id = $1 AND id = $2
            FOR UPDATE
        "#,
    )
    .bind(user_id)
    .bind(flashcard_id)
    .fetch_optional(executor)
    .await
}

/// Insert a card with a fresh review state: no counts, one-day interval, due now.
pub async fn insert_flashcard<'e, E>(
    executor: E,
    user_id: Uuid,
    card: &NewFlashcard,
) -> Result<FlashcardRow, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO flashcards (user_id, subject_id, content, front, back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, subject_id, content, front, back, correct_count, wrong_count,
                      interval_days, next_review, last_difficulty, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(card.subject_id)
    .bind(&card.content)
    .bind(&card.front)
    .bind(&card.back)
    .fetch_one(executor)
    .await
}

/// Edit a card's content. The review state is only ever changed by
/// [`apply_flashcard_review`].
pub async fn update_flashcard<'e, E>(
    executor: E,
    user_id: Uuid,
    flashcard_id: Uuid,
    changes: &FlashcardChanges,
) -> Result<Option<FlashcardRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE flashcards
            SET subject_id = COALESCE($3, subject_id),
                content = COALESCE($4, content),
                front = COALESCE($5, front),
                back = COALESCE($6, back),
                updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING id, subject_id, content, front, back, correct_count, wrong_count,
                      interval_days, next_review, last_difficulty, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(flashcard_id)
    .bind(changes.subject_id)
    .bind(changes.content.as_deref())
    .bind(changes.front.as_deref())
    .bind(changes.back.as_deref())
    .fetch_optional(executor)
    .await
}

pub async fn apply_flashcard_review<'e, E>(
    executor: E,
    user_id: Uuid,
    flashcard_id: Uuid,
    review: &FlashcardReviewUpdate,
) -> Result<FlashcardRow, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE flashcards
            SET correct_count = $3,
                wrong_count = $4,
                interval_days = $5,
                next_review = $6,
                last_difficulty = $7,
                updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING id, subject_id, content, front, back, correct_count, wrong_count,
                      interval_days, next_review, last_difficulty, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(flashcard_id)
    .bind(to_i32(review.counters.correct_count)?)
    .bind(to_i32(review.counters.wrong_count)?)
    .bind(to_i32(review.interval_days)?)
    .bind(review.next_review)
    .bind(review.difficulty.as_str())
    .fetch_one(executor)
    .await
}

pub async fn delete_flashcard<'e, E>(
    executor: E,
    user_id: Uuid,
    flashcard_id: Uuid,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM flashcards
            WHERE user_id = $1 AND id = $2
        "#,
    )
    .bind(user_id)
    .bind(flashcard_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}
