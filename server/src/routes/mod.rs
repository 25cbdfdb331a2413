//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module stitches the public credential endpoints and the guarded
//! session endpoints into a single Axum router, with CORS tuned for the
//! browser client (cookies cross origins only with credentials allowed
//! and a concrete origin).

pub mod auth;
pub mod users;

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

const DEFAULT_WEB_ORIGIN: &str = "http://localhost:5173";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/users/register", post(users::register))
        .route("/api/v1/users/auth", post(users::login))
        .route("/api/v1/auth/me", get(auth::me))
        .route("/api/v1/auth/logout", post(auth::logout))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    let origin = std::env::var("WEB_ORIGIN").unwrap_or_else(|_| DEFAULT_WEB_ORIGIN.to_string());
    let allow_origin = origin
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_WEB_ORIGIN));

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::PUT,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-xsrf-token"),
        ])
        .expose_headers([header::LINK])
        .allow_credentials(true)
        .max_age(Duration::from_secs(300))
}

async fn health() -> &'static str {
    "Health check working"
}
