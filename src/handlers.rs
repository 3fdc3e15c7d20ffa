use axum::extract::State;
use maud::Markup;

use crate::{database::DatabaseState, errors::AppError, session::SessionFlag, views};

// --- Handlers ---

/// home
///
/// [Public Route] Renders the login form or the dashboard depending on the session cookie.
/// Always answers 200; an unauthenticated visitor simply gets the form.
pub async fn home(SessionFlag(is_allowed): SessionFlag) -> Markup {
    views::home(is_allowed)
}

/// health
///
/// [Public Route] Liveness probe. Does not touch the database.
pub async fn health() -> &'static str {
    "ok"
}

/// db_health
///
/// [Public Route] Readiness probe. Returns 503 through `AppError` when Postgres is unreachable.
pub async fn db_health(State(db): State<DatabaseState>) -> Result<&'static str, AppError> {
    db.ping().await?;
    Ok("ok")
}
