// Token Verifier: validates Google Sign-In ID tokens.
//
// The client-side widget hands the browser a signed JWT; this module checks
// it against Google's published JWKS document and the configured client id
// (the audience), then maps the verified claims to an `Identity`. Every
// failure mode is a `VerifyError` variant; callers treat any error as
// "unauthenticated" and nothing here panics.

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

use crate::config;
use crate::http;
use crate::types::Identity;

const GOOGLE_ISSUERS: [&str; 2] = ["https://accounts.google.com", "accounts.google.com"];

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("malformed token header: {0}")]
    Header(jsonwebtoken::errors::Error),
    #[error("token header has no key id")]
    MissingKeyId,
    #[error("failed to fetch signing keys: {0}")]
    KeyFetch(#[from] reqwest::Error),
    #[error("no signing key with id {0}")]
    UnknownKey(String),
    #[error("invalid signing key: {0}")]
    InvalidKey(jsonwebtoken::errors::Error),
    #[error("token rejected: {0}")]
    Rejected(jsonwebtoken::errors::Error),
    #[error("verified token has no email claim")]
    MissingEmail,
}

/// Subset of the ID token claims the portal uses. Audience, issuer, and
/// expiry are enforced by `Validation`, not read from here.
#[derive(Debug, Deserialize)]
pub struct GoogleClaims {
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

/// Verify a raw ID token and return the identity it attests to.
///
/// Keys are fetched fresh from the JWKS endpoint on every call; at this
/// system's scale that round-trip is accepted in exchange for never serving
/// a rotated-out key.
pub async fn verify_google_token(raw: &str) -> Result<Identity, VerifyError> {
    let google = &config::config().google;

    let header = decode_header(raw).map_err(VerifyError::Header)?;
    let kid = header.kid.ok_or(VerifyError::MissingKeyId)?;

    let jwks: JwkSet = http::client()
        .get(&google.jwks_url)
        .send()
        .await?
        .json()
        .await?;
    let jwk = jwks
        .keys
        .iter()
        .find(|k| k.kid == kid)
        .ok_or_else(|| VerifyError::UnknownKey(kid.clone()))?;

    let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e).map_err(VerifyError::InvalidKey)?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[&google.client_id]);
    validation.set_issuer(&GOOGLE_ISSUERS);

    let data = decode::<GoogleClaims>(raw, &key, &validation).map_err(VerifyError::Rejected)?;

    identity_from_claims(data.claims)
}

fn identity_from_claims(claims: GoogleClaims) -> Result<Identity, VerifyError> {
    let email = claims.email.ok_or(VerifyError::MissingEmail)?;

    Ok(Identity {
        email,
        name: claims.name.unwrap_or_default(),
        picture: claims.picture.unwrap_or_default(),
        data_link: None,
    })
}
