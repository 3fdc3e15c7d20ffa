use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Pages Router Module
///
/// `POST /api/login` is intentionally absent: the form targets it, but the endpoint belongs to
/// a separate service.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        // GET /
        // Login form for anonymous visitors, dashboard once the `auth` cookie matches.
        .route("/", get(handlers::home))
}
