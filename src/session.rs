use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};

use crate::config::SessionConfig;

/// CookieSource
///
/// The one capability the Request Gate needs from a web framework: look up a cookie value
/// by name. Any adapter that can provide this can drive `is_authenticated`.
pub trait CookieSource {
    fn cookie_value(&self, name: &str) -> Option<&str>;
}

/// RequestCookies
///
/// `name=value` pairs borrowed straight from the `Cookie` headers. Names are trimmed, values
/// are kept byte-for-byte: no percent-decoding, no whitespace or quote stripping.
#[derive(Debug, Default)]
pub struct RequestCookies<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> RequestCookies<'a> {
    /// Pairs without `=` and non-UTF-8 header values are skipped.
    pub fn from_headers(headers: &'a HeaderMap) -> Self {
        let pairs = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.split_once('='))
            .map(|(name, value)| (name.trim(), value))
            .collect();
        Self { pairs }
    }
}

impl CookieSource for RequestCookies<'_> {
    // Last occurrence of a name wins.
    fn cookie_value(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

/// is_authenticated
///
/// True iff the configured cookie is present and its value matches exactly.
pub fn is_authenticated<C: CookieSource + ?Sized>(cookies: &C, session: &SessionConfig) -> bool {
    cookies
        .cookie_value(&session.cookie_name)
        .is_some_and(|value| value == session.cookie_value)
}

/// SessionFlag
///
/// Per-request presumed login state. Extraction never fails: a missing, malformed or
/// non-matching cookie simply yields `SessionFlag(false)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionFlag(pub bool);

impl<S> FromRequestParts<S> for SessionFlag
where
    S: Send + Sync,
    SessionConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = SessionConfig::from_ref(state);
        let cookies = RequestCookies::from_headers(&parts.headers);
        let flag = is_authenticated(&cookies, &session);

        tracing::debug!(authenticated = flag, "session gate evaluated");
        Ok(SessionFlag(flag))
    }
}
