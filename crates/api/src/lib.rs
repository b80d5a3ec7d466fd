//! HTTP API layer for quill.
//!
//! This crate provides the JSON API:
//!
//! - **Endpoints**: public blog and contact surface, admin CRUD
//! - **Extractors**: authentication, client IP resolution
//! - **Middleware**: session/token authentication
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::{AppState, SESSION_COOKIE};
