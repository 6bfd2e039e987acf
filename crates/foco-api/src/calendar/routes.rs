use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::NaiveDate;
use foco_db::{models::Task, repositories::task};
use serde::Deserialize;

use super::week::{CalendarWeek, build_week, week_bounds};
use crate::{ApiState, auth::AuthUser, error::ApiError, task::TaskView};

pub fn routes() -> Router<ApiState> {
    Router::new().route("/calendar/week", get(get_week))
}

#[derive(Debug, Deserialize)]
struct WeekQuery {
    date: Option<NaiveDate>,
}

/// The Sunday-to-Saturday week containing `date` (today by default).
async fn get_week(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<CalendarWeek>, ApiError> {
    let today = state.today();
    let date = query.date.unwrap_or(today);
    let (start, end) = week_bounds(date);

    let rows = task::list_tasks_between(&state.pool, auth_user.user_id, start, end).await?;
    let tasks = rows
        .into_iter()
        .map(|row| Task::try_from(row).map(|task| TaskView::new(task, today)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(build_week(date, today, tasks)))
}
