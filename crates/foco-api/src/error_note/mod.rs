//! The error notebook: mistakes the student wants to revisit, reviewed on a
//! fixed ladder (1, 3, 7, 14 then 30 days).

mod routes;
pub mod stats;

pub use routes::routes;
