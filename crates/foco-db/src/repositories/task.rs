use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{NewTask, TaskChanges, TaskRow, TaskStatus};

fn minutes(value: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

/// List the user's tasks ordered by date, optionally narrowed by status and subject.
pub async fn list_tasks<'e, E>(
    executor: E,
    user_id: Uuid,
    status: Option<TaskStatus>,
    subject_id: Option<Uuid>,
) -> Result<Vec<TaskRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, subject_id, title, description, due_date, duration_minutes,
                   status, completed_at, created_at, updated_at
            FROM tasks
            WHERE user_id = $1
                AND ($2::text IS NULL OR status = $2)
                AND ($3::uuid IS NULL OR subject_id = $3)
            ORDER BY due_date, created_at, id
        "#,
    )
    .bind(user_id)
    .bind(status.map(TaskStatus::as_str))
    .bind(subject_id)
    .fetch_all(executor)
    .await
}

/// Tasks with a date in `[from, to]`, both ends inclusive.
pub async fn list_tasks_between<'e, E>(
    executor: E,
    user_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<TaskRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, subject_id, title, description, due_date, duration_minutes,
                   status, completed_at, created_at, updated_at
            FROM tasks
            WHERE user_id = $1 AND due_date BETWEEN $2 AND $3
            ORDER BY due_date, created_at, id
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(executor)
    .await
}

pub async fn find_task<'e, E>(
    executor: E,
    user_id: Uuid,
    task_id: Uuid,
) -> Result<Option<TaskRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, subject_id, title, description, due_date, duration_minutes,
                   status, completed_at, created_at, updated_at
            FROM tasks
            WHERE user_id = $1 AND id = $2
        "#,
    )
    .bind(user_id)
    .bind(task_id)
    .fetch_optional(executor)
    .await
}

pub async fn insert_task<'e, E>(
    executor: E,
    user_id: Uuid,
    task: &NewTask,
) -> Result<TaskRow, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO tasks (user_id, subject_id, title, description, due_date,
                               duration_minutes, status, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, CASE WHEN $7 = 'done' THEN NOW() END)
            RETURNING id, subject_id, title, description, due_date, duration_minutes,
                      status, completed_at, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(task.subject_id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.due_date)
    .bind(minutes(task.duration_minutes)?)
    .bind(task.status.as_str())
    .fetch_one(executor)
    .await
}

/// Apply the given changes; fields left as `None` keep their value.
///
/// Moving a task to `done` stamps `completed_at` (kept if it was already done);
/// moving it out of `done` clears it.
pub async fn update_task<'e, E>(
    executor: E,
    user_id: Uuid,
    task_id: Uuid,
    changes: &TaskChanges,
) -> Result<Option<TaskRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE tasks
            SET subject_id = COALESCE($3, subject_id),
                title = COALESCE($4, title),
                description = COALESCE($5, description),
                due_date = COALESCE($6, due_date),
                duration_minutes = COALESCE($7, duration_minutes),
                status = COALESCE($8, status),
                completed_at = CASE
                    WHEN $8::text IS NULL THEN completed_at
                    WHEN $8 = 'done' THEN COALESCE(completed_at, NOW())
                    ELSE NULL
                END,
                updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING id, subject_id, title, description, due_date, duration_minutes,
                      status, completed_at, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(task_id)
    .bind(changes.subject_id)
    .bind(changes.title.as_deref())
    .bind(changes.description.as_deref())
    .bind(changes.due_date)
    .bind(changes.duration_minutes.map(minutes).transpose()?)
    .bind(changes.status.map(TaskStatus::as_str))
    .fetch_optional(executor)
    .await
}

pub async fn delete_task<'e, E>(executor: E, user_id: Uuid, task_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM tasks
            WHERE user_id = $1 AND id = $2
        "#,
    )
    .bind(user_id)
    .bind(task_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}
