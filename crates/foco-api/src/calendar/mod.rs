//! Week view of the task schedule.

mod routes;
pub mod week;

pub use routes::routes;
