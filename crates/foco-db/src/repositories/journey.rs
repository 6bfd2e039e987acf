use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{JourneyProgressRow, JourneyStatus};

/// Every topic status the user has recorded. Topics without a row are `todo`.
pub async fn list_journey_progress<'e, E>(
    executor: E,
    user_id: Uuid,
) -> Result<Vec<JourneyProgressRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT area, topic, status, updated_at
            FROM journey_progress
            WHERE user_id = $1
            ORDER BY area, topic
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// Set the status of one topic, creating the row on first use.
pub async fn upsert_journey_status<'e, E>(
    executor: E,
    user_id: Uuid,
    area: &str,
    topic: &str,
    status: JourneyStatus,
) -> Result<JourneyProgressRow, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO journey_progress (user_id, area, topic, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, area, topic)
            DO UPDATE SET
                status = EXCLUDED.status,
                updated_at = NOW()
            RETURNING area, topic, status, updated_at
        "#,
    )
    .bind(user_id)
    .bind(area)
    .bind(topic)
    .bind(status.as_str())
    .fetch_one(executor)
    .await
}
