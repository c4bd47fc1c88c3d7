// Request Gate: runs before every route handler, uniformly.
//
// Reads the session cookie once per request, derives the per-request
// context, deletes the cookie if it does not parse (so the next request
// starts clean), and rejects unauthenticated access to protected paths
// before any route-specific handler sees the request.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::error::ApiError;
use crate::session::{self, SESSION_COOKIE};
use crate::types::{Identity, Session};

/// Per-request identity context derived from the session cookie.
/// Inserted as a request extension by `session_gate`; never persisted.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    pub session: Option<Session>,
}

impl SessionContext {
    pub fn identity(&self) -> Option<&Identity> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn data_link(&self) -> Option<&str> {
        self.identity()?.data_link.as_deref()
    }
}

/// Paths that require an authenticated session. The auth endpoint itself is
/// exempt so that login requests can get through.
fn is_protected(path: &str) -> bool {
    path.starts_with("/api/") && !path.starts_with("/api/auth")
}

/// Session middleware applied as a global layer ahead of all routes.
pub async fn session_gate(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let mut jar = jar;
    let mut context = SessionContext::default();

    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        match session::parse_session(cookie.value()) {
            Some(parsed) => context.session = Some(parsed),
            None => {
                // Self-healing: drop the bad cookie rather than erroring on
                // every subsequent request.
                tracing::debug!("discarding malformed session cookie");
                jar = jar.remove(session::removal_cookie());
            }
        }
    }

    if is_protected(request.uri().path()) && context.identity().is_none() {
        return (jar, ApiError::unauthorized("Unauthorized")).into_response();
    }

    request.extensions_mut().insert(context);
    (jar, next.run(request).await).into_response()
}
