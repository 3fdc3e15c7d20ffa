use axum::{Router, extract::FromRef, http::HeaderName};

use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod config;
pub mod database;
pub mod errors;
pub mod handlers;
pub mod session;
pub mod views;

pub mod routes;
use routes::{health, pages};

// --- Public Re-exports ---

pub use config::{AppConfig, SessionConfig};
pub use database::{DatabaseState, MockDatabase, PostgresDatabase};
pub use errors::{AppError, ConfigError, DbError};

/// AppState
///
/// The single, immutable container shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// Database access behind the `Database` trait.
    pub db: DatabaseState,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for DatabaseState {
    fn from_ref(app_state: &AppState) -> DatabaseState {
        app_state.db.clone()
    }
}

impl FromRef<AppState> for SessionConfig {
    fn from_ref(app_state: &AppState) -> SessionConfig {
        app_state.config.session.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the routes, registers the application state and wraps everything in the
/// request-id and tracing layers.
pub fn create_router(state: AppState) -> Router {
    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(pages::page_routes())
        .merge(health::health_routes())
        .with_state(state);

    base_router.layer(
        ServiceBuilder::new()
            // Generates a unique UUID for every incoming request.
            .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(trace_span_logger)
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(tower_http::LatencyUnit::Millis),
                    ),
            )
            // Echoes the request id back to the client.
            .layer(PropagateRequestIdLayer::new(x_request_id)),
    )
}

/// trace_span_logger
///
/// Builds the per-request span so every log line for one request carries the same id.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
