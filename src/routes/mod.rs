/// Router Module Index
///
/// Splits the HTTP surface into rendered pages and operational probes. Neither group needs an
/// authentication layer: the home page reads the session cookie itself and never rejects.

/// Server-rendered HTML pages.
pub mod pages;

/// Liveness and readiness endpoints for load balancers and orchestration.
pub mod health;
