use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::{
    make_rate_limit_layer,
    middleware::rate_limit::{GENERAL_BURST, GENERAL_REPLENISH_MS},
    state::ApiState,
    v1,
};

pub fn router() -> Router<ApiState> {
    let api = v1::routes().layer(make_rate_limit_layer!(GENERAL_REPLENISH_MS, GENERAL_BURST));

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .nest("/v1", api)
        .fallback(handler_404)
}

/// Liveness: the process is up.
async fn health() -> StatusCode {
    StatusCode::OK
}

/// Readiness: the database answers.
async fn ready(State(state): State<ApiState>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "The requested resource was not found" })),
    )
}
