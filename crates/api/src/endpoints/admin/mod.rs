//! Admin endpoints.
//!
//! Everything here except `/login` requires an authenticated session;
//! unauthenticated requests get 401 from the [`AuthUser`] extractor.
//!
//! [`AuthUser`]: crate::extractors::AuthUser

mod posts;
mod questions;
mod users;

use axum::Router;

use crate::{endpoints::auth, middleware::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/posts", posts::router())
        .nest("/users", users::router())
        .nest("/questions", questions::router())
}
