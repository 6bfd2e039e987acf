use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use foco_db::{
    models::{NewSubject, Priority, Subject, SubjectChanges, from_rows},
    repositories::subject,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    ApiState,
    auth::AuthUser,
    error::ApiError,
    validation::{validate_hex_color, validate_not_blank},
};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/subjects", get(list_subjects).post(create_subject))
        .route(
            "/subjects/{id}",
            get(get_subject).patch(update_subject).delete(delete_subject),
        )
}

#[derive(Debug, Deserialize, Validate)]
struct CreateSubjectRequest {
    #[validate(length(min = 1, max = 100), custom(function = validate_not_blank))]
    name: String,
    #[serde(default)]
    priority: Option<Priority>,
    #[validate(length(min = 1, max = 100), custom(function = validate_not_blank))]
    category: String,
    #[validate(custom(function = validate_hex_color))]
    color: String,
}

#[derive(Debug, Deserialize, Validate)]
struct UpdateSubjectRequest {
    #[validate(length(min = 1, max = 100), custom(function = validate_not_blank))]
    name: Option<String>,
    priority: Option<Priority>,
    #[validate(length(min = 1, max = 100), custom(function = validate_not_blank))]
    category: Option<String>,
    #[validate(custom(function = validate_hex_color))]
    color: Option<String>,
}

async fn list_subjects(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<Subject>>, ApiError> {
    let rows = subject::list_subjects(&state.pool, auth_user.user_id).await?;
    Ok(Json(from_rows(rows)?))
}

async fn get_subject(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Subject>, ApiError> {
    let row = subject::find_subject(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Subject"))?;
    Ok(Json(row.try_into()?))
}

async fn create_subject(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<Subject>), ApiError> {
    payload.validate()?;

    let new_subject = NewSubject {
        name: payload.name.trim().to_string(),
        priority: payload.priority.unwrap_or(Priority::Medium),
        category: payload.category.trim().to_string(),
        color: payload.color,
    };

    let row = subject::insert_subject(&state.pool, auth_user.user_id, &new_subject).await?;
    tracing::info!(user_id = %auth_user.user_id, subject_id = %row.id, "subject created");

    Ok((StatusCode::CREATED, Json(row.try_into()?)))
}

async fn update_subject(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSubjectRequest>,
) -> Result<Json<Subject>, ApiError> {
    payload.validate()?;

    let changes = SubjectChanges {
        name: payload.name.map(|n| n.trim().to_string()),
        priority: payload.priority,
        category: payload.category.map(|c| c.trim().to_string()),
        color: payload.color,
    };

    let row = subject::update_subject(&state.pool, auth_user.user_id, id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Subject"))?;
    Ok(Json(row.try_into()?))
}

async fn delete_subject(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !subject::delete_subject(&state.pool, auth_user.user_id, id).await? {
        return Err(ApiError::not_found("Subject"));
    }
    tracing::info!(user_id = %auth_user.user_id, subject_id = %id, "subject deleted");
    Ok(StatusCode::NO_CONTENT)
}
