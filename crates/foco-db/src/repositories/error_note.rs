use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{ErrorNoteChanges, ErrorNoteRow, ErrorType, NewErrorNote};

pub async fn list_error_notes<'e, E>(
    executor: E,
    user_id: Uuid,
    subject_id: Option<Uuid>,
    error_type: Option<ErrorType>,
) -> Result<Vec<ErrorNoteRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, subject_id, content, question, wrong_answer, correct_answer, insight,
                   error_type, occurred_on, review_dates, last_reviewed, created_at, updated_at
            FROM error_notes
            WHERE user_id = $1
                AND ($2::uuid IS NULL OR subject_id = $2)
                AND ($3::text IS NULL OR error_type = $3)
            ORDER BY occurred_on DESC, created_at DESC, id
        "#,
    )
    .bind(user_id)
    .bind(subject_id)
    .bind(error_type.map(ErrorType::as_str))
    .fetch_all(executor)
    .await
}

pub async fn find_error_note<'e, E>(
    executor: E,
    user_id: Uuid,
    note_id: Uuid,
) -> Result<Option<ErrorNoteRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, subject_id, content, question, wrong_answer, correct_answer, insight,
                   error_type, occurred_on, review_dates, last_reviewed, created_at, updated_at
            FROM error_notes
            WHERE user_id = $1 AND id = $2
        "#,
    )
    .bind(user_id)
    .bind(note_id)
    .fetch_optional(executor)
    .await
}

/// Insert a note with an empty review history.
pub async fn insert_error_note<'e, E>(
    executor: E,
    user_id: Uuid,
    note: &NewErrorNote,
) -> Result<ErrorNoteRow, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO error_notes (user_id, subject_id, content, question, wrong_answer,
                                     correct_answer, insight, error_type, occurred_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, subject_id, content, question, wrong_answer, correct_answer, insight,
                      error_type, occurred_on, review_dates, last_reviewed, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(note.subject_id)
    .bind(&note.content)
    .bind(&note.question)
    .bind(&note.wrong_answer)
    .bind(&note.correct_answer)
    .bind(&note.insight)
    .bind(note.error_type.as_str())
    .bind(note.occurred_on)
    .fetch_one(executor)
    .await
}

/// Edit a note's content. The review history is untouched.
pub async fn update_error_note<'e, E>(
    executor: E,
    user_id: Uuid,
    note_id: Uuid,
    changes: &ErrorNoteChanges,
) -> Result<Option<ErrorNoteRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE error_notes
            SET subject_id = COALESCE($3, subject_id),
                content = COALESCE($4, content),
                question = COALESCE($5, question),
                wrong_answer = COALESCE($6, wrong_answer),
                correct_answer = COALESCE($7, correct_answer),
                insight = COALESCE($8, insight),
                error_type = COALESCE($9, error_type),
                occurred_on = COALESCE($10, occurred_on),
                updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING id, subject_id, content, question, wrong_answer, correct_answer, insight,
                      error_type, occurred_on, review_dates, last_reviewed, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(note_id)
    .bind(changes.subject_id)
    .bind(changes.content.as_deref())
    .bind(changes.question.as_deref())
    .bind(changes.wrong_answer.as_deref())
    .bind(changes.correct_answer.as_deref())
    .bind(changes.insight.as_deref())
    .bind(changes.error_type.map(ErrorType::as_str))
    .bind(changes.occurred_on)
    .fetch_optional(executor)
    .await
}

/// Append `today` to the review history and mark it as the last review, in a
/// single statement so concurrent reviews never lose a date.
pub async fn record_error_note_review<'e, E>(
    executor: E,
    user_id: Uuid,
    note_id: Uuid,
    today: NaiveDate,
) -> Result<Option<ErrorNoteRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE error_notes
            SET review_dates = array_append(review_dates, $3::date),
                last_reviewed = $3,
                updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING id, subject_id, content, question, wrong_answer, correct_answer, insight,
                      error_type, occurred_on, review_dates, last_reviewed, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(note_id)
    .bind(today)
    .fetch_optional(executor)
    .await
}

pub async fn delete_error_note<'e, E>(
    executor: E,
    user_id: Uuid,
    note_id: Uuid,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM error_notes
            WHERE user_id = $1 AND id = $2
        "#,
    )
    .bind(user_id)
    .bind(note_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}
