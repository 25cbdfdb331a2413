//! REST API client for the auth server.
//!
//! ERROR HANDLING
//! ==============
//! Every failed call collapses to one displayable message. A body parsing
//! as `{ "error": ... }` supplies it; otherwise 400/401 fall back to the
//! uniform credential message and other statuses to a generic one. The
//! forms attach whatever message comes out of here to the email field.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use payloads::{Credentials, ErrorBody, UserBody};
use reqwest::StatusCode;

pub const REGISTER_PATH: &str = "/api/v1/users/register";
pub const SIGN_IN_PATH: &str = "/api/v1/users/auth";
pub const ME_PATH: &str = "/api/v1/auth/me";
pub const LOGOUT_PATH: &str = "/api/v1/auth/logout";

const CREDENTIAL_FALLBACK: &str = "invalid email or password";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response; the message is ready for inline display.
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Message for a failed response, given its status and raw body.
fn error_from_parts(status: u16, body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        if !parsed.error.is_empty() {
            return parsed.error;
        }
    }
    match status {
        400 | 401 => CREDENTIAL_FALLBACK.to_owned(),
        _ => format!("request failed with status {status}"),
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

// =============================================================================
// CLIENT
// =============================================================================

/// HTTP client with a cookie jar, so the session cookie set at sign-in
/// rides along on `current_user` / `logout` automatically.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client against a server base URL such as `http://localhost:3001`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the underlying client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { base_url: base_url.into(), http })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// `POST /api/v1/users/register` — create an account, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] for non-2xx responses (400 carries the
    /// validation or duplicate-email message) and [`ApiError::Transport`]
    /// when the request never completed.
    pub async fn register(&self, credentials: &Credentials) -> Result<UserBody, ApiError> {
        let response = self.http.post(self.url(REGISTER_PATH)).json(credentials).send().await?;
        if response.status().is_success() {
            return Ok(response.json::<UserBody>().await?);
        }
        Err(server_error(response).await)
    }

    /// `POST /api/v1/users/auth` — verify credentials; success sets the
    /// session cookie in the jar.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] for non-2xx responses and
    /// [`ApiError::Transport`] when the request never completed.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let response = self.http.post(self.url(SIGN_IN_PATH)).json(credentials).send().await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(server_error(response).await)
    }

    /// `GET /api/v1/auth/me` — the signed-in user, or `None` when the
    /// session is missing or no longer valid.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] for unexpected statuses and
    /// [`ApiError::Transport`] when the request never completed.
    pub async fn current_user(&self) -> Result<Option<UserBody>, ApiError> {
        let response = self.http.get(self.url(ME_PATH)).send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        if response.status().is_success() {
            return Ok(Some(response.json::<UserBody>().await?));
        }
        Err(server_error(response).await)
    }

    /// `POST /api/v1/auth/logout` — end the session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] for non-2xx responses and
    /// [`ApiError::Transport`] when the request never completed.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self.http.post(self.url(LOGOUT_PATH)).send().await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(server_error(response).await)
    }
}

async fn server_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.bytes().await.unwrap_or_default();
    ApiError::Server { status, message: error_from_parts(status, &body) }
}
