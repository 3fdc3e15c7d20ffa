use crate::{AppState, handlers};
use axum::{Router, routing::get};

pub fn health_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Returns "ok" immediately to verify the service is running and responsive.
        .route("/health", get(handlers::health))
        // GET /health/db
        // Pings Postgres through a pooled connection; 503 when it cannot be reached.
        .route("/health/db", get(handlers::db_health))
}
