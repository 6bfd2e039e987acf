//! Dashboard totals over the student's tasks, flashcards and error notes.

mod routes;
pub mod stats;

pub use routes::routes;
pub use stats::percent;
