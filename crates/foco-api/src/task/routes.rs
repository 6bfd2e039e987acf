use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::NaiveDate;
use foco_db::{
    models::{NewTask, Task, TaskChanges, TaskStatus},
    repositories::task,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    ApiState,
    auth::AuthUser,
    error::ApiError,
    normalization::SearchQuery,
    subject::ensure_subject_owned,
    validation::{validate_not_blank, validate_search_term},
};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).patch(update_task).delete(delete_task),
        )
}

/// A task as shown on the board and the calendar.
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub overdue: bool,
}

impl TaskView {
    pub fn new(task: Task, today: NaiveDate) -> Self {
        let overdue = task.is_overdue(today);
        Self { task, overdue }
    }
}

#[derive(Debug, Deserialize)]
struct TaskFilters {
    status: Option<TaskStatus>,
    search: Option<String>,
    subject_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
struct CreateTaskRequest {
    subject_id: Uuid,
    #[validate(length(min = 1, max = 200), custom(function = validate_not_blank))]
    title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    description: String,
    due_date: NaiveDate,
    #[validate(range(min = 1, max = 1440))]
    duration_minutes: u32,
    #[serde(default)]
    status: Option<TaskStatus>,
}

#[derive(Debug, Deserialize, Validate)]
struct UpdateTaskRequest {
    subject_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200), custom(function = validate_not_blank))]
    title: Option<String>,
    #[validate(length(max = 2000))]
    description: Option<String>,
    due_date: Option<NaiveDate>,
    #[validate(range(min = 1, max = 1440))]
    duration_minutes: Option<u32>,
    status: Option<TaskStatus>,
}

fn to_view(row: foco_db::models::TaskRow, today: NaiveDate) -> Result<TaskView, ApiError> {
    Ok(TaskView::new(row.try_into()?, today))
}

async fn list_tasks(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(filters): Query<TaskFilters>,
) -> Result<Json<Vec<TaskView>>, ApiError> {
    if let Some(term) = &filters.search {
        validate_search_term(term)?;
    }
    let search = SearchQuery::new(filters.search.as_deref());
    let today = state.today();

    let rows = task::list_tasks(
        &state.pool,
        auth_user.user_id,
        filters.status,
        filters.subject_id,
    )
    .await?;

    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        let view = to_view(row, today)?;
        let keep = search.as_ref().is_none_or(|query| {
            query.matches_any(&[view.task.title.as_str(), view.task.description.as_str()])
        });
        if keep {
            views.push(view);
        }
    }

    Ok(Json(views))
}

async fn get_task(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskView>, ApiError> {
    let row = task::find_task(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task"))?;
    Ok(Json(to_view(row, state.today())?))
}

async fn create_task(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskView>), ApiError> {
    payload.validate()?;
    ensure_subject_owned(&state.pool, auth_user.user_id, payload.subject_id).await?;

    let new_task = NewTask {
        subject_id: payload.subject_id,
        title: payload.title.trim().to_string(),
        description: payload.description,
        due_date: payload.due_date,
        duration_minutes: payload.duration_minutes,
        status: payload.status.unwrap_or(TaskStatus::Pending),
    };

    let row = task::insert_task(&state.pool, auth_user.user_id, &new_task).await?;
    tracing::info!(user_id = %auth_user.user_id, task_id = %row.id, "task created");

    Ok((StatusCode::CREATED, Json(to_view(row, state.today())?)))
}

async fn update_task(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<TaskView>, ApiError> {
    payload.validate()?;
    if let Some(subject_id) = payload.subject_id {
        ensure_subject_owned(&state.pool, auth_user.user_id, subject_id).await?;
    }

    let changes = TaskChanges {
        subject_id: payload.subject_id,
        title: payload.title.map(|t| t.trim().to_string()),
        description: payload.description,
        due_date: payload.due_date,
        duration_minutes: payload.duration_minutes,
        status: payload.status,
    };

    let row = task::update_task(&state.pool, auth_user.user_id, id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Task"))?;

    if let Some(status) = changes.status {
        tracing::debug!(user_id = %auth_user.user_id, task_id = %id, %status, "task status set");
    }

    Ok(Json(to_view(row, state.today())?))
}

async fn delete_task(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !task::delete_task(&state.pool, auth_user.user_id, id).await? {
        return Err(ApiError::not_found("Task"));
    }
    Ok(StatusCode::NO_CONTENT)
}
