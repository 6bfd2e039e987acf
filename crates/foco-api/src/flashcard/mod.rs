mod review;
mod routes;

pub use review::{ReviewResult, review_flashcard};
pub use routes::routes;
