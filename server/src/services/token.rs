//! Session token minting and validation (HS256 JWT).
//!
//! The token carries both the user id (`sub`) and the session id (`sid`);
//! the guard checks the signature first and only then touches the database,
//! so forged tokens never cost a session lookup.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_TOKEN_SECRET: &str = "a-very-secret-token";
const DEFAULT_TOKEN_ISSUER: &str = "secure-downtask-auth";
const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token encoding failed: {0}")]
    Encode(jsonwebtoken::errors::Error),
    #[error("invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

/// Signing configuration for session tokens. The audience equals the issuer.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub issuer: String,
    /// Session lifetime; also used for the cookie and the session row expiry.
    pub ttl: time::Duration,
}

impl TokenConfig {
    /// Load from `TOKEN_SECRET`, `TOKEN_ISSUER`, `SESSION_TTL_HOURS`, with
    /// development defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let ttl_hours = std::env::var("SESSION_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(DEFAULT_SESSION_TTL_HOURS);

        Self {
            secret: std::env::var("TOKEN_SECRET").unwrap_or_else(|_| DEFAULT_TOKEN_SECRET.to_owned()),
            issuer: std::env::var("TOKEN_ISSUER").unwrap_or_else(|_| DEFAULT_TOKEN_ISSUER.to_owned()),
            ttl: time::Duration::hours(ttl_hours),
        }
    }
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    /// Session id.
    pub sid: Uuid,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub iss: String,
    pub aud: String,
}

/// Mint a signed token for the given user and session.
///
/// # Errors
///
/// Returns [`TokenError::Encode`] if signing fails.
pub fn mint(config: &TokenConfig, user_id: Uuid, session_id: Uuid) -> Result<String, TokenError> {
    mint_at(config, user_id, session_id, unix_now())
}

/// Internal: mint with an explicit issue time (for testing).
fn mint_at(config: &TokenConfig, user_id: Uuid, session_id: Uuid, now: i64) -> Result<String, TokenError> {
    let claims = Claims {
        sub: user_id,
        sid: session_id,
        exp: now + config.ttl.whole_seconds(),
        iat: now,
        nbf: now,
        iss: config.issuer.clone(),
        aud: config.issuer.clone(),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(TokenError::Encode)
}

/// Validate a token's signature, expiry, not-before, issuer and audience,
/// returning its claims.
///
/// # Errors
///
/// Returns [`TokenError::Invalid`] for anything that fails validation.
pub fn verify(config: &TokenConfig, token: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.issuer]);
    validation.validate_nbf = true;

    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(TokenError::Invalid)
}

fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
