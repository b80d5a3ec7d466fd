//! API endpoints.

mod admin;
mod auth;
mod blog;
mod contacts;

use axum::Router;
use serde::Deserialize;

use crate::middleware::AppState;

/// Default page size for listing endpoints.
const DEFAULT_PAGE_SIZE: u64 = 20;
/// Upper bound on the page size a client may request.
const MAX_PAGE_SIZE: u64 = 100;

/// Pagination query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Pagination {
    /// Effective page size, clamped to [`MAX_PAGE_SIZE`].
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE)
    }

    /// Effective offset.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(blog::router())
        .nest("/contacts", contacts::router())
        .nest("/admin", admin::router())
}
