// Session Issuer: serializes the session into a cookie and back.
//
// Stateless by design: there is no server-side session store, so the cookie
// carries the whole session. The trade-off is documented in DESIGN.md —
// a session cannot be revoked before its 24 hour expiry.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::config;
use crate::types::Session;

pub const SESSION_COOKIE: &str = "session";

/// Build the session cookie: path=/, HttpOnly, SameSite=Lax, Secure outside
/// development, Max-Age from config (24 hours by default).
pub fn issue_cookie(session: &Session) -> Result<Cookie<'static>, serde_json::Error> {
    let settings = &config::config().session;
    let value = serde_json::to_string(session)?;

    Ok(Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.cookie_secure)
        .max_age(Duration::seconds(settings.max_age_secs as i64))
        .build())
}

/// Parse a session cookie value. `None` means the cookie is malformed and
/// should be deleted so the next request starts clean.
pub fn parse_session(raw: &str) -> Option<Session> {
    serde_json::from_str(raw).ok()
}

/// Removal cookie for the self-healing delete; the path must match the one
/// the session cookie was issued with.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}
