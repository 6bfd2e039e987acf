use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use foco_db::{
    models::{Flashcard, FlashcardChanges, NewFlashcard, Subject, from_rows},
    repositories::{flashcard, subject},
};
use foco_srs::Difficulty;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::review::{ReviewResult, review_flashcard};
use crate::{
    ApiState,
    auth::AuthUser,
    error::ApiError,
    make_rate_limit_layer,
    middleware::rate_limit::{REVIEW_BURST, REVIEW_REPLENISH_MS},
    subject::ensure_subject_owned,
    validation::validate_not_blank,
};

pub fn routes() -> Router<ApiState> {
    let review = Router::new()
        .route("/flashcards/{id}/review", post(submit_review))
        .route_layer(make_rate_limit_layer!(REVIEW_REPLENISH_MS, REVIEW_BURST));

    Router::new()
        .route("/flashcards", get(list_flashcards).post(create_flashcard))
        .route(
            "/flashcards/{id}",
            get(get_flashcard)
                .patch(update_flashcard)
                .delete(delete_flashcard),
        )
        .route("/flashcards/review", get(review_queue))
        .route("/flashcards/review/subjects", get(review_subjects))
        .merge(review)
}

#[derive(Debug, Deserialize)]
struct SubjectFilter {
    subject_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
struct ReviewQueueQuery {
    subject_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
struct CreateFlashcardRequest {
    subject_id: Uuid,
    #[serde(default)]
    #[validate(length(max = 200))]
    content: String,
    #[validate(length(min = 1, max = 2000), custom(function = validate_not_blank))]
    front: String,
    #[validate(length(min = 1, max = 2000), custom(function = validate_not_blank))]
    back: String,
}

#[derive(Debug, Deserialize, Validate)]
struct UpdateFlashcardRequest {
    subject_id: Option<Uuid>,
    #[validate(length(max = 200))]
    content: Option<String>,
    #[validate(length(min = 1, max = 2000), custom(function = validate_not_blank))]
    front: Option<String>,
    #[validate(length(min = 1, max = 2000), custom(function = validate_not_blank))]
    back: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReviewRequest {
    difficulty: String,
}

/// A subject offered on the review screen.
#[derive(Debug, Serialize)]
struct ReviewSubject {
    #[serde(flatten)]
    subject: Subject,
    total_cards: i64,
    due_cards: i64,
}

async fn list_flashcards(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(filter): Query<SubjectFilter>,
) -> Result<Json<Vec<Flashcard>>, ApiError> {
    let rows = flashcard::list_flashcards(&state.pool, auth_user.user_id, filter.subject_id).await?;
    Ok(Json(from_rows(rows)?))
}

async fn get_flashcard(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Flashcard>, ApiError> {
    let row = flashcard::find_flashcard(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Flashcard"))?;
    Ok(Json(row.try_into()?))
}

async fn create_flashcard(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<CreateFlashcardRequest>,
) -> Result<(StatusCode, Json<Flashcard>), ApiError> {
    payload.validate()?;
    ensure_subject_owned(&state.pool, auth_user.user_id, payload.subject_id).await?;

    let card = NewFlashcard {
        subject_id: payload.subject_id,
        content: payload.content.trim().to_string(),
        front: payload.front,
        back: payload.back,
    };

    let row = flashcard::insert_flashcard(&state.pool, auth_user.user_id, &card).await?;
    tracing::info!(user_id = %auth_user.user_id, flashcard_id = %row.id, "flashcard created");

    Ok((StatusCode::CREATED, Json(row.try_into()?)))
}

async fn update_flashcard(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFlashcardRequest>,
) -> Result<Json<Flashcard>, ApiError> {
    payload.validate()?;
    if let Some(subject_id) = payload.subject_id {
        ensure_subject_owned(&state.pool, auth_user.user_id, subject_id).await?;
    }

    let changes = FlashcardChanges {
        subject_id: payload.subject_id,
        content: payload.content.map(|c| c.trim().to_string()),
        front: payload.front,
        back: payload.back,
    };

    let row = flashcard::update_flashcard(&state.pool, auth_user.user_id, id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Flashcard"))?;
    Ok(Json(row.try_into()?))
}

async fn delete_flashcard(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !flashcard::delete_flashcard(&state.pool, auth_user.user_id, id).await? {
        return Err(ApiError::not_found("Flashcard"));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Subjects that own at least one card, with how many are due today.
async fn review_subjects(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<ReviewSubject>>, ApiError> {
    let counts =
        flashcard::count_cards_by_subject(&state.pool, auth_user.user_id, state.today()).await?;
    let subjects: Vec<Subject> =
        from_rows(subject::list_subjects(&state.pool, auth_user.user_id).await?)?;

    let review_subjects = subjects
        .into_iter()
        .filter_map(|subject| {
            let count = counts.iter().find(|c| c.subject_id == subject.id)?;
            Some(ReviewSubject {
                subject,
                total_cards: count.total,
                due_cards: count.due,
            })
        })
        .collect();

    Ok(Json(review_subjects))
}

/// Due cards of one subject: never reviewed first, then oldest review date first.
async fn review_queue(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<ReviewQueueQuery>,
) -> Result<Json<Vec<Flashcard>>, ApiError> {
    ensure_subject_owned(&state.pool, auth_user.user_id, query.subject_id).await?;

    let rows = flashcard::list_due_flashcards(
        &state.pool,
        auth_user.user_id,
        query.subject_id,
        state.today(),
        state.review_queue_limit,
    )
    .await?;

    Ok(Json(from_rows(rows)?))
}

async fn submit_review(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<ReviewResult>, ApiError> {
    let difficulty: Difficulty = payload
        .difficulty
        .parse()
        .map_err(|e: foco_srs::ParseDifficultyError| ApiError::Validation(e.to_string()))?;

    let result =
        review_flashcard(&state.pool, auth_user.user_id, id, difficulty, state.today()).await?;
    Ok(Json(result))
}
