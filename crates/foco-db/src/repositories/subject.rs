use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{NewSubject, SubjectChanges, SubjectRow};

pub async fn list_subjects<'e, E>(executor: E, user_id: Uuid) -> Result<Vec<SubjectRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, name, priority, category, color, created_at, updated_at
            FROM subjects
            WHERE user_id = $1
            ORDER BY created_at, id
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

pub async fn find_subject<'e, E>(
    executor: E,
    user_id: Uuid,
    subject_id: Uuid,
) -> Result<Option<SubjectRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, name, priority, category, color, created_at, updated_at
            FROM subjects
            WHERE user_id = $1 AND id = $2
        "#,
    )
    .bind(user_id)
    .bind(subject_id)
    .fetch_optional(executor)
    .await
}

/// Whether the subject exists and belongs to the user.
pub async fn subject_owned_by<'e, E>(
    executor: E,
    user_id: Uuid,
    subject_id: Uuid,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT EXISTS(
                SELECT 1 FROM subjects
                WHERE user_id = $1 AND id = $2
            )
        "#,
    )
    .bind(user_id)
    .bind(subject_id)
    .fetch_one(executor)
    .await
}

pub async fn insert_subject<'e, E>(
    executor: E,
    user_id: Uuid,
    subject: &NewSubject,
) -> Result<SubjectRow, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO subjects (user_id, name, priority, category, color)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, priority, category, color, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(&subject.name)
    .bind(subject.priority.as_str())
    .bind(&subject.category)
    .bind(&subject.color)
    .fetch_one(executor)
    .await
}

/// Apply the given changes; fields left as `None` keep their value.
pub async fn update_subject<'e, E>(
    executor: E,
    user_id: Uuid,
    subject_id: Uuid,
    changes: &SubjectChanges,
) -> Result<Option<SubjectRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE subjects
            SET name = COALESCE($3, name),
                priority = COALESCE($4, priority),
                category = COALESCE($5, category),
                color = COALESCE($6, color),
                updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING id, name, priority, category, color, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(subject_id)
    .bind(changes.name.as_deref())
    .bind(changes.priority.map(|p| p.as_str()))
    .bind(changes.category.as_deref())
    .bind(changes.color.as_deref())
    .fetch_optional(executor)
    .await
}

/// Delete a subject. Its tasks, flashcards and error notes go with it.
pub async fn delete_subject<'e, E>(
    executor: E,
    user_id: Uuid,
    subject_id: Uuid,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM subjects
            WHERE user_id = $1 AND id = $2
        "#,
    )
    .bind(user_id)
    .bind(subject_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}
