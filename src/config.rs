use std::{env, fmt, str::FromStr, time::Duration};

use crate::errors::ConfigError;

/// AppConfig
///
/// Holds the application's entire configuration state. Loaded once at startup and then
/// shared read-only with every request through `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and which variables are mandatory.
    pub env: Env,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Cookie gate parameters.
    pub session: SessionConfig,
    // Postgres connection parameters.
    pub db: DbConfig,
}

/// Env
///
/// Defines the runtime context. Local falls back to development defaults, Production
/// demands every secret explicitly.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// SessionConfig
///
/// The cookie the Request Gate compares against. This is an equality check only; it has no
/// secrecy, expiry or tamper resistance.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_value: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "auth".to_string(),
            cookie_value: "bar".to_string(),
        }
    }
}

/// DbConfig
///
/// Recognized connection options: `user`, `database`, `hostname`, `port`, `password`,
/// plus pool sizing.
#[derive(Clone)]
pub struct DbConfig {
    pub user: String,
    pub database: String,
    pub hostname: String,
    pub port: u16,
    pub password: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

// Hand-written so the password never reaches a log line.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("user", &self.user)
            .field("database", &self.database)
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("password", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            user: "postgres".to_string(),
            database: "hpcc".to_string(),
            hostname: "localhost".to_string(),
            port: DEFAULT_DB_PORT,
            password: "password".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

impl Default for AppConfig {
    /// default
    ///
    /// Local configuration built without reading the environment. Used by test scaffolding.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            session: SessionConfig::default(),
            db: DbConfig::default(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads all parameters from environment variables. In `Env::Local` every variable has a
    /// development fallback; in `Env::Production` the credentials and the cookie value must be
    /// set explicitly or loading fails.
    pub fn load() -> Result<Self, ConfigError> {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let defaults = Self::default();

        // Resolves a string variable, falling back to the local default outside production.
        let text = |key: &'static str, fallback: &str| -> Result<String, ConfigError> {
            match (env::var(key), &env) {
                (Ok(value), _) => Ok(value),
                (Err(_), Env::Local) => Ok(fallback.to_string()),
                (Err(_), Env::Production) => Err(ConfigError::Missing(key)),
            }
        };

        let cookie_value = text("AUTH_COOKIE_VALUE", &defaults.session.cookie_value)?;
        // An empty value would let a bare `auth=` through the gate.
        if cookie_value.is_empty() {
            return Err(ConfigError::Invalid {
                key: "AUTH_COOKIE_VALUE",
                value: cookie_value,
            });
        }

        let session = SessionConfig {
            cookie_name: env::var("AUTH_COOKIE_NAME").unwrap_or(defaults.session.cookie_name),
            cookie_value,
        };

        let db = DbConfig {
            user: text("DB_USER", &defaults.db.user)?,
            database: text("DB_NAME", &defaults.db.database)?,
            hostname: text("DB_HOST", &defaults.db.hostname)?,
            port: parsed("DB_PORT", DEFAULT_DB_PORT)?,
            password: text("DB_PASSWORD", &defaults.db.password)?,
            max_connections: parsed("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            acquire_timeout: Duration::from_secs(parsed(
                "DB_ACQUIRE_TIMEOUT_SECS",
                DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?),
        };

        Ok(Self {
            env,
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            session,
            db,
        })
    }
}

/// Reads an optional numeric variable. Present-but-unparsable is an error, never a fallback.
fn parsed<T: FromStr>(key: &'static str, fallback: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(fallback),
    }
}
