pub mod analytics;
pub mod auth;
pub mod calendar;
pub mod config;
pub mod error;
pub mod error_note;
pub mod flashcard;
pub mod journey;
pub mod metrics;
pub mod middleware;
pub mod normalization;
pub mod router;
pub mod state;
pub mod subject;
pub mod task;
pub mod tracing;
pub mod v1;
pub mod validation;

pub use config::ApiConfig;
pub use state::{ApiState, AuthConfig};
