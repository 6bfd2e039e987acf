mod routes;

pub use routes::routes;

use foco_db::repositories::subject;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::error::ApiError;

/// 404 unless the subject exists and belongs to the user.
///
/// Run before creating or re-parenting anything under a subject.
pub async fn ensure_subject_owned<'e, E>(
    executor: E,
    user_id: Uuid,
    subject_id: Uuid,
) -> Result<(), ApiError>
where
    E: Executor<'e, Database = Postgres>,
{
    if subject::subject_owned_by(executor, user_id, subject_id).await? {
        Ok(())
    } else {
        Err(ApiError::not_found("Subject"))
    }
}
