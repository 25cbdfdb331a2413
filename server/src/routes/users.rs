//! Registration and login routes.

use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::CookieJar;
use payloads::{Credentials, UserBody};

use super::auth::session_cookie;
use crate::error::ApiError;
use crate::rate_limit::RateLimitError;
use crate::services::{session, token, users};
use crate::state::AppState;

/// Single message for unknown email and wrong password, so the response
/// does not reveal which one was rejected.
const LOGIN_FAILED: &str = "invalid email or password";

pub(crate) fn to_user_body(user: users::User) -> UserBody {
    UserBody { id: user.id.to_string(), email: user.email, created_at: user.created_at }
}

fn user_error_to_api(err: users::UserError) -> ApiError {
    let message = err.to_string();
    match err {
        users::UserError::EmailTaken => ApiError::bad_request(message),
        other => ApiError::internal(other),
    }
}

fn rate_limit_error_to_api(err: &RateLimitError) -> ApiError {
    ApiError::new(StatusCode::TOO_MANY_REQUESTS, err.to_string())
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/v1/users/register` — create an account.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(credentials) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    credentials.validate().map_err(|e| ApiError::bad_request(e.to_string()))?;

    let user = users::create_user(&state.pool, &credentials.email, &credentials.password)
        .await
        .map_err(user_error_to_api)?;

    Ok((StatusCode::CREATED, Json(to_user_body(user))))
}

/// `POST /api/v1/users/auth` — verify credentials, open a session, set the cookie.
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(credentials) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    credentials.validate().map_err(|e| ApiError::bad_request(e.to_string()))?;

    // Attempts count before the credential check, valid password or not.
    state
        .rate_limiter
        .check_and_record(&credentials.email)
        .map_err(|e| rate_limit_error_to_api(&e))?;

    let stored = users::find_by_email(&state.pool, &credentials.email)
        .await
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::unauthorized(LOGIN_FAILED))?;

    let verified =
        users::verify_password(&credentials.password, &stored.password_hash).map_err(ApiError::internal)?;
    if !verified {
        return Err(ApiError::unauthorized(LOGIN_FAILED));
    }

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let opened = session::create_session(&state.pool, stored.id, &addr.ip().to_string(), user_agent, state.token.ttl)
        .await
        .map_err(ApiError::internal)?;

    let minted = token::mint(&state.token, stored.id, opened.id).map_err(ApiError::internal)?;

    let jar = CookieJar::new().add(session_cookie(minted, state.token.ttl));
    Ok((jar, Json(serde_json::json!({ "ok": true }))))
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
