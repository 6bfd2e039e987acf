use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::NaiveDate;
use foco_db::{
    models::{ErrorNote, ErrorNoteChanges, ErrorNoteRow, ErrorType, NewErrorNote, from_rows},
    repositories::{error_note, subject},
};
use foco_srs::build_due_queue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::stats::{ErrorNoteStats, error_note_stats};
use crate::{
    ApiState,
    auth::AuthUser,
    error::ApiError,
    make_rate_limit_layer,
    metrics::{ReviewKind, record_review},
    middleware::rate_limit::{REVIEW_BURST, REVIEW_REPLENISH_MS},
    normalization::SearchQuery,
    subject::ensure_subject_owned,
    validation::{validate_not_blank, validate_search_term},
};

pub fn routes() -> Router<ApiState> {
    let review = Router::new()
        .route("/error-notes/{id}/review", post(review_error_note))
        .route_layer(make_rate_limit_layer!(REVIEW_REPLENISH_MS, REVIEW_BURST));

    Router::new()
        .route("/error-notes", get(list_error_notes).post(create_error_note))
        .route("/error-notes/due", get(due_error_notes))
        .route("/error-notes/stats", get(get_stats))
        .route(
            "/error-notes/{id}",
            get(get_error_note)
                .patch(update_error_note)
                .delete(delete_error_note),
        )
        .merge(review)
}

/// A note with its position on the review ladder.
#[derive(Debug, Clone, Serialize)]
struct ErrorNoteView {
    #[serde(flatten)]
    note: ErrorNote,
    /// `None` until the first review
    next_due: Option<NaiveDate>,
    is_due: bool,
}

impl ErrorNoteView {
    fn new(note: ErrorNote, today: NaiveDate) -> Self {
        Self {
            next_due: note.next_due(),
            is_due: note.is_due(today),
            note,
        }
    }
}

fn to_view(row: ErrorNoteRow, today: NaiveDate) -> Result<ErrorNoteView, ApiError> {
    Ok(ErrorNoteView::new(row.try_into()?, today))
}

#[derive(Debug, Deserialize)]
struct ErrorNoteFilters {
    subject_id: Option<Uuid>,
    error_type: Option<ErrorType>,
    content: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct CreateErrorNoteRequest {
    subject_id: Uuid,
    #[validate(length(min = 1, max = 200), custom(function = validate_not_blank))]
    content: String,
    #[validate(length(min = 1, max = 4000), custom(function = validate_not_blank))]
    question: String,
    #[validate(length(min = 1, max = 2000), custom(function = validate_not_blank))]
    wrong_answer: String,
    #[validate(length(min = 1, max = 2000), custom(function = validate_not_blank))]
    correct_answer: String,
    #[serde(default)]
    #[validate(length(max = 4000))]
    insight: String,
    #[serde(default)]
    error_type: Option<ErrorType>,
    occurred_on: NaiveDate,
}

#[derive(Debug, Deserialize, Validate)]
struct UpdateErrorNoteRequest {
    subject_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200), custom(function = validate_not_blank))]
    content: Option<String>,
    #[validate(length(min = 1, max = 4000), custom(function = validate_not_blank))]
    question: Option<String>,
    #[validate(length(min = 1, max = 2000), custom(function = validate_not_blank))]
    wrong_answer: Option<String>,
    #[validate(length(min = 1, max = 2000), custom(function = validate_not_blank))]
    correct_answer: Option<String>,
    #[validate(length(max = 4000))]
    insight: Option<String>,
    error_type: Option<ErrorType>,
    occurred_on: Option<NaiveDate>,
}

async fn list_error_notes(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(filters): Query<ErrorNoteFilters>,
) -> Result<Json<Vec<ErrorNoteView>>, ApiError> {
    if let Some(term) = &filters.content {
        validate_search_term(term)?;
    }
    let search = SearchQuery::new(filters.content.as_deref());
    let today = state.today();

    let rows = error_note::list_error_notes(
        &state.pool,
        auth_user.user_id,
        filters.subject_id,
        filters.error_type,
    )
    .await?;

    let notes: Vec<ErrorNote> = from_rows(rows)?;
    let views = notes
        .into_iter()
        .filter(|note| {
            search
                .as_ref()
                .is_none_or(|query| query.matches_any(&[note.content.as_str()]))
        })
        .map(|note| ErrorNoteView::new(note, today))
        .collect();

    Ok(Json(views))
}

/// Notes due today: never reviewed first, then by next due date.
async fn due_error_notes(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<ErrorNoteView>>, ApiError> {
    let today = state.today();
    let rows = error_note::list_error_notes(&state.pool, auth_user.user_id, None, None).await?;
    let notes: Vec<ErrorNote> = from_rows(rows)?;

    let limit = usize::try_from(state.review_queue_limit).unwrap_or(usize::MAX);
    let queue = build_due_queue(notes, today, ErrorNote::next_due)
        .into_iter()
        .take(limit)
        .map(|note| ErrorNoteView::new(note, today))
        .collect();

    Ok(Json(queue))
}

async fn get_stats(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<ErrorNoteStats>, ApiError> {
    let notes: Vec<ErrorNote> = from_rows(
        error_note::list_error_notes(&state.pool, auth_user.user_id, None, None).await?,
    )?;
    let subjects = from_rows(subject::list_subjects(&state.pool, auth_user.user_id).await?)?;

    Ok(Json(error_note_stats(&notes, &subjects)))
}

async fn get_error_note(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ErrorNoteView>, ApiError> {
    let row = error_note::find_error_note(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Error note"))?;
    Ok(Json(to_view(row, state.today())?))
}

async fn create_error_note(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<CreateErrorNoteRequest>,
) -> Result<(StatusCode, Json<ErrorNoteView>), ApiError> {
    payload.validate()?;
    ensure_subject_owned(&state.pool, auth_user.user_id, payload.subject_id).await?;

    let note = NewErrorNote {
        subject_id: payload.subject_id,
        content: payload.content.trim().to_string(),
        question: payload.question,
        wrong_answer: payload.wrong_answer,
        correct_answer: payload.correct_answer,
        insight: payload.insight,
        error_type: payload.error_type.unwrap_or(ErrorType::Conceptual),
        occurred_on: payload.occurred_on,
    };

    let row = error_note::insert_error_note(&state.pool, auth_user.user_id, &note).await?;
    tracing::info!(user_id = %auth_user.user_id, error_note_id = %row.id, "error note created");

    Ok((StatusCode::CREATED, Json(to_view(row, state.today())?)))
}

async fn update_error_note(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateErrorNoteRequest>,
) -> Result<Json<ErrorNoteView>, ApiError> {
    payload.validate()?;
    if let Some(subject_id) = payload.subject_id {
        ensure_subject_owned(&state.pool, auth_user.user_id, subject_id).await?;
    }

    let changes = ErrorNoteChanges {
        subject_id: payload.subject_id,
        content: payload.content.map(|c| c.trim().to_string()),
        question: payload.question,
        wrong_answer: payload.wrong_answer,
        correct_answer: payload.correct_answer,
        insight: payload.insight,
        error_type: payload.error_type,
        occurred_on: payload.occurred_on,
    };

    let row = error_note::update_error_note(&state.pool, auth_user.user_id, id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Error note"))?;
    Ok(Json(to_view(row, state.today())?))
}

async fn delete_error_note(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !error_note::delete_error_note(&state.pool, auth_user.user_id, id).await? {
        return Err(ApiError::not_found("Error note"));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Record today's review. Every review advances the note one step on its ladder.
async fn review_error_note(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ErrorNoteView>, ApiError> {
    let today = state.today();
    let row = error_note::record_error_note_review(&state.pool, auth_user.user_id, id, today)
        .await?
        .ok_or_else(|| ApiError::not_found("Error note"))?;

    let view = to_view(row, today)?;
    record_review(ReviewKind::ErrorNote, "reviewed");
    tracing::info!(
        user_id = %auth_user.user_id,
        error_note_id = %id,
        reviews = view.note.review_dates.len(),
        next_due = ?view.next_due,
        "error note reviewed"
    );

    Ok(Json(view))
}
