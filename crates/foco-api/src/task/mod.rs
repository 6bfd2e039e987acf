mod routes;

pub use routes::{TaskView, routes};
