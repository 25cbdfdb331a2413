//! Auth routes — session guard, current-user lookup, logout.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use payloads::UserBody;
use time::Duration;

use crate::error::ApiError;
use crate::services::{session, token, users};
use crate::state::AppState;

const COOKIE_NAME: &str = "session_token";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("ENV").map(|env| env == "production").unwrap_or(false)
}

// =============================================================================
// COOKIES
// =============================================================================

/// Session cookie set at login. HttpOnly keeps it away from page scripts;
/// Max-Age matches the session row expiry.
pub(crate) fn session_cookie(token: String, ttl: Duration) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(ttl)
        .build()
}

pub(crate) fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated caller extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: users::User,
    pub session: session::Session,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let raw = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if raw.is_empty() {
            return Err(ApiError::unauthorized("invalid user"));
        }

        let app_state = AppState::from_ref(state);
        let claims =
            token::verify(&app_state.token, raw).map_err(|_| ApiError::unauthorized("invalid token"))?;

        let live_session = session::get_session(&app_state.pool, claims.sid)
            .await
            .map_err(ApiError::internal)?
            .ok_or_else(|| ApiError::unauthorized("invalid session"))?;

        let user = users::find_by_id(&app_state.pool, claims.sub)
            .await
            .map_err(ApiError::internal)?
            .ok_or_else(|| ApiError::unauthorized("invalid user"))?;

        Ok(Self { user, session: live_session })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/v1/auth/me` — return the current user.
pub async fn me(auth: AuthUser) -> Json<UserBody> {
    Json(super::users::to_user_body(auth.user))
}

/// `POST /api/v1/auth/logout` — delete the session, clear the cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> Result<impl IntoResponse, ApiError> {
    session::delete_session(&state.pool, auth.session.id)
        .await
        .map_err(ApiError::internal)?;

    let jar = CookieJar::new().add(clear_session_cookie());
    Ok((jar, StatusCode::NO_CONTENT))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
