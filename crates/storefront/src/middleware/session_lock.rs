//! Per-visitor request serialization.
//!
//! A session is read at the start of a request and written back when the
//! response leaves the session layer. Two overlapping requests from one
//! visitor would each write their own copy and the later write would drop
//! the earlier change. This layer sits outside the session layer and holds
//! a lock keyed by the session cookie for the whole request, so one
//! visitor's page events apply one at a time. Requests from different
//! visitors never wait on each other.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::Response,
};
use moka::future::Cache;
use tokio::sync::Mutex;
use tower_sessions::cookie::Cookie;

use super::session::{MAX_SESSIONS, SESSION_COOKIE_NAME, SESSION_EXPIRY_SECONDS};

/// Paths that never touch the session.
const UNLOCKED_PREFIXES: [&str; 2] = ["/static/", "/health"];

/// Locks for live sessions, dropped after the session would have expired.
#[derive(Clone)]
pub struct SessionLocks {
    locks: Cache<String, Arc<Mutex<()>>>,
}

impl SessionLocks {
    /// Create an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locks: Cache::builder()
                .max_capacity(MAX_SESSIONS)
                .time_to_idle(Duration::from_secs(SESSION_EXPIRY_SECONDS.unsigned_abs()))
                .build(),
        }
    }

    /// The lock guarding one session.
    async fn lock_for(&self, session_id: String) -> Arc<Mutex<()>> {
        self.locks.get_with(session_id, async { Arc::default() }).await
    }
}

impl Default for SessionLocks {
    fn default() -> Self {
        Self::new()
    }
}

/// Session cookie value sent with the request, if any.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}

/// Middleware that runs one visitor's requests one at a time.
///
/// Visitors without a session cookie have nothing to share yet and pass
/// straight through.
pub async fn session_lock_middleware(
    State(locks): State<SessionLocks>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if UNLOCKED_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        return next.run(request).await;
    }
    let Some(session_id) = session_cookie(request.headers()) else {
        return next.run(request).await;
    };

    let lock = locks.lock_for(session_id).await;
    let _guard = lock.lock().await;
    next.run(request).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_session_cookie_is_found_among_others() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_cookie(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; levure_session=abc123"));
        assert_eq!(session_cookie(&headers).as_deref(), Some("abc123"));

        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_cookie(&headers), None);
    }

    #[tokio::test]
    async fn test_same_session_shares_a_lock() {
        let locks = SessionLocks::new();
        let first = locks.lock_for("a".to_string()).await;
        let again = locks.lock_for("a".to_string()).await;
        let other = locks.lock_for("b".to_string()).await;
        assert!(Arc::ptr_eq(&first, &again));
        assert!(!Arc::ptr_eq(&first, &other));

        let _held = first.lock().await;
        assert!(again.try_lock().is_err());
        assert!(other.try_lock().is_ok());
    }
}
