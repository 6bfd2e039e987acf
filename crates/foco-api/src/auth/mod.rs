//! Session handling.
//!
//! Accounts live with the hosted auth provider. This service only verifies the
//! provider's access tokens and scopes every query to the token's subject.

pub mod jwt;
pub mod middleware;

pub use middleware::AuthUser;
