use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, put},
};
use foco_db::{
    models::{JourneyProgress, JourneyStatus, from_rows},
    repositories::journey,
};
use serde::{Deserialize, Serialize};

use super::{
    catalogue::{Area, CATALOGUE, TopicLevel, find_area},
    progress::{
        AreaProgress, JourneySummary, StatusBook, TopicView, area_progress, area_topics, summarize,
    },
};
use crate::{ApiState, auth::AuthUser, error::ApiError};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/journey", get(get_area))
        .route("/journey/status", put(set_status))
        .route("/journey/progress", get(get_progress))
}

#[derive(Debug, Deserialize)]
struct AreaQuery {
    area: Option<String>,
    level: Option<TopicLevel>,
    status: Option<JourneyStatus>,
}

#[derive(Debug, Deserialize)]
struct SetStatusRequest {
    area: String,
    topic: String,
    status: JourneyStatus,
}

#[derive(Debug, Serialize)]
struct AreaResponse {
    areas: Vec<&'static str>,
    progress: AreaProgress,
    topics: Vec<TopicView>,
}

fn lookup_area(name: &str) -> Result<&'static Area, ApiError> {
    find_area(name).ok_or_else(|| ApiError::Validation(format!("Unknown area: '{name}'")))
}

async fn load_book(state: &ApiState, auth_user: &AuthUser) -> Result<StatusBook, ApiError> {
    let rows = journey::list_journey_progress(&state.pool, auth_user.user_id).await?;
    let progress: Vec<JourneyProgress> = from_rows(rows)?;
    Ok(StatusBook::new(progress))
}

/// Topics of one area (the first one by default) with the student's statuses.
async fn get_area(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<AreaQuery>,
) -> Result<Json<AreaResponse>, ApiError> {
    let area = match query.area.as_deref() {
        Some(name) => lookup_area(name)?,
        None => &CATALOGUE[0],
    };
    let book = load_book(&state, &auth_user).await?;

    Ok(Json(AreaResponse {
        areas: CATALOGUE.iter().map(|a| a.name).collect(),
        progress: area_progress(area, &book),
        topics: area_topics(area, &book, query.level, query.status),
    }))
}

async fn set_status(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<Json<JourneyProgress>, ApiError> {
    let area = lookup_area(&payload.area)?;
    let topic = area.topic(&payload.topic).ok_or_else(|| {
        ApiError::Validation(format!(
            "Unknown topic '{}' in area '{}'",
            payload.topic, area.name
        ))
    })?;

    let row = journey::upsert_journey_status(
        &state.pool,
        auth_user.user_id,
        area.name,
        topic.name,
        payload.status,
    )
    .await?;

    tracing::info!(
        user_id = %auth_user.user_id,
        area = area.name,
        topic = topic.name,
        status = %payload.status,
        "journey status changed"
    );

    Ok(Json(row.try_into()?))
}

async fn get_progress(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<JourneySummary>, ApiError> {
    let book = load_book(&state, &auth_user).await?;
    Ok(Json(summarize(&book)))
}
