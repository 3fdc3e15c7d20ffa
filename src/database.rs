use async_trait::async_trait;
use sqlx::{
    Connection, PgConnection, PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use std::sync::Arc;

use crate::{config::DbConfig, errors::DbError};

impl DbConfig {
    /// connect_options
    ///
    /// Translates the recognized options into sqlx connect options.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.hostname)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

/// connect
///
/// Opens a single dedicated connection. The caller owns it; dropping it closes the socket.
pub async fn connect(config: &DbConfig) -> Result<PgConnection, DbError> {
    tracing::debug!(host = %config.hostname, port = config.port, "opening postgres connection");
    PgConnection::connect_with(&config.connect_options())
        .await
        .map_err(DbError::Connect)
}

/// lazy_pool
///
/// Builds a pool that opens connections on first use, so startup never waits on Postgres.
pub fn lazy_pool(config: &DbConfig) -> PgPool {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(config.connect_options())
}

/// Database Trait
///
/// The persistence seam used by handlers. Kept behind a trait object so tests can swap in
/// `MockDatabase` without a running Postgres.
#[async_trait]
pub trait Database: Send + Sync {
    /// Round-trips a trivial query to prove the database is reachable.
    async fn ping(&self) -> Result<(), DbError>;
}

/// DatabaseState
///
/// The shared handle stored in `AppState`.
pub type DatabaseState = Arc<dyn Database>;

/// PostgresDatabase
///
/// `Database` backed by a sqlx connection pool.
pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Database for PostgresDatabase {
    /// ping
    ///
    /// The pooled connection is held only for the duration of this call and goes back to the
    /// pool when the guard drops, whether the query succeeds or not.
    async fn ping(&self) -> Result<(), DbError> {
        let mut conn = self.pool.acquire().await.map_err(DbError::Connect)?;
        sqlx::query("SELECT 1")
            .execute(&mut *conn)
            .await
            .map_err(DbError::Query)?;
        Ok(())
    }
}

/// MockDatabase
///
/// In-memory stand-in for tests.
#[derive(Clone, Default)]
pub struct MockDatabase {
    /// When true, every call fails as if Postgres were down.
    pub should_fail: bool,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self { should_fail: false }
    }

    pub fn new_failing() -> Self {
        Self { should_fail: true }
    }
}

#[async_trait]
impl Database for MockDatabase {
    async fn ping(&self) -> Result<(), DbError> {
        if self.should_fail {
            return Err(DbError::Connect(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}
