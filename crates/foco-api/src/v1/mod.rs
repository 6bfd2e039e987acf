use axum::Router;

use crate::{analytics, calendar, error_note, flashcard, journey, state::ApiState, subject, task};

/// V1 API routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .merge(subject::routes())
        .merge(task::routes())
        .merge(calendar::routes())
        .merge(flashcard::routes())
        .merge(error_note::routes())
        .merge(journey::routes())
        .merge(analytics::routes())
}
