use axum::{Json, Router, extract::State, routing::get};
use foco_db::{
    models::{ErrorNote, Flashcard, Subject, Task, from_rows},
    repositories::{error_note, flashcard, subject, task},
};

use super::stats::{Dashboard, dashboard};
use crate::{ApiState, auth::AuthUser, error::ApiError};

pub fn routes() -> Router<ApiState> {
    Router::new().route("/analytics", get(get_dashboard))
}

async fn get_dashboard(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Dashboard>, ApiError> {
    let user_id = auth_user.user_id;

    let subjects: Vec<Subject> = from_rows(subject::list_subjects(&state.pool, user_id).await?)?;
    let tasks: Vec<Task> = from_rows(task::list_tasks(&state.pool, user_id, None, None).await?)?;
    let cards: Vec<Flashcard> =
        from_rows(flashcard::list_flashcards(&state.pool, user_id, None).await?)?;
    let notes: Vec<ErrorNote> =
        from_rows(error_note::list_error_notes(&state.pool, user_id, None, None).await?)?;

    Ok(Json(dashboard(
        &subjects,
        &tasks,
        &cards,
        &notes,
        state.today(),
    )))
}
