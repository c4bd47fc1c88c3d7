// POST /api/auth - verify a Google ID token, authorize against the
// directory, and issue the session cookie.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::verify_google_token;
use crate::directory;
use crate::error::ApiError;
use crate::session;
use crate::types::{Identity, Session};

const ACCESS_DENIED: &str = "Access denied. Your email is not authorized.";

#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub token: Option<String>,
}

/// POST /api/auth - authenticate and authorize.
///
/// - 400 when the body is not valid JSON
/// - 401 when the token is missing or fails verification
/// - 403 when the verified email has no directory row (a directory fetch
///   failure is deliberately indistinguishable from "not authorized" on the
///   wire; the distinction lives in the server logs)
/// - 200 with the user payload and a `session` Set-Cookie on success
pub async fn auth_post(
    jar: CookieJar,
    body: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    // Take over the extractor rejection so every failure on this endpoint
    // speaks the same envelope.
    let Json(body) = body.map_err(|e| {
        tracing::debug!("rejected auth request body: {}", e);
        ApiError::bad_request("Invalid request body")
    })?;

    let token = body
        .token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::unauthorized("No token provided"))?;

    let verified = verify_google_token(&token).await.map_err(|e| {
        tracing::warn!("token verification failed: {}", e);
        ApiError::unauthorized("Invalid token")
    })?;

    let row = match directory::authorize(&verified.email).await {
        Ok(Some(row)) => row,
        Ok(None) => {
            tracing::info!("login denied: {} not in directory", verified.email);
            return Err(ApiError::forbidden(ACCESS_DENIED));
        }
        Err(e) => {
            tracing::error!("directory lookup failed: {}", e);
            return Err(ApiError::forbidden(ACCESS_DENIED));
        }
    };

    let user = Identity {
        data_link: Some(row.data_link).filter(|link| !link.is_empty()),
        ..verified
    };

    let session = Session {
        user: user.clone(),
        token: Some(token),
    };

    let cookie = session::issue_cookie(&session).map_err(|e| {
        tracing::error!("failed to serialize session: {}", e);
        ApiError::internal_server_error("Server authentication error")
    })?;

    tracing::info!("login ok: {}", user.email);

    Ok((
        jar.add(cookie),
        Json(json!({
            "success": true,
            "user": user
        })),
    ))
}
