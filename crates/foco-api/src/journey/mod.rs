//! The ENEM journey: a fixed catalogue of exam topics and the student's
//! status on each of them, scored by topic weight.

pub mod catalogue;
pub mod progress;
mod routes;

pub use routes::routes;
