//! Session store — one row per signed-in browser session.
//!
//! Sessions are written at login with a fixed expiry and read on every
//! guarded request. Expired rows stop validating immediately via the
//! `expires_at > now()` filter; the background sweeper only reclaims the
//! storage afterwards.

use std::time::Duration;

use sqlx::{PgPool, Row};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::AppState;

const DEFAULT_SESSION_SWEEP_INTERVAL_SECS: u64 = 300;

/// Session row as stored.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Caller address recorded at login.
    pub ip: String,
    /// Caller user agent recorded at login.
    pub user_agent: String,
    pub created_at: String,
    pub last_seen_at: String,
    pub expires_at: String,
}

/// Create a session for the given user, expiring after `ttl`.
pub async fn create_session(
    pool: &PgPool,
    user_id: Uuid,
    ip: &str,
    user_agent: &str,
    ttl: time::Duration,
) -> Result<Session, sqlx::Error> {
    let row = sqlx::query(
        r"INSERT INTO sessions (user_id, ip, user_agent, expires_at)
          VALUES ($1, $2, $3, now() + make_interval(secs => $4))
          RETURNING id, user_id, ip, user_agent,
                    to_char(created_at, 'YYYY-MM-DD HH24:MI:SS') AS created_at,
                    to_char(last_seen_at, 'YYYY-MM-DD HH24:MI:SS') AS last_seen_at,
                    to_char(expires_at, 'YYYY-MM-DD HH24:MI:SS') AS expires_at",
    )
    .bind(user_id)
    .bind(ip)
    .bind(user_agent)
    .bind(ttl.as_seconds_f64())
    .fetch_one(pool)
    .await?;

    Ok(row_to_session(&row))
}

/// Fetch an unexpired session by id, refreshing its last-seen timestamp.
/// Returns `None` for unknown or expired sessions.
pub async fn get_session(pool: &PgPool, id: Uuid) -> Result<Option<Session>, sqlx::Error> {
    let row = sqlx::query(
        r"UPDATE sessions
          SET last_seen_at = now()
          WHERE id = $1 AND expires_at > now()
          RETURNING id, user_id, ip, user_agent,
                    to_char(created_at, 'YYYY-MM-DD HH24:MI:SS') AS created_at,
                    to_char(last_seen_at, 'YYYY-MM-DD HH24:MI:SS') AS last_seen_at,
                    to_char(expires_at, 'YYYY-MM-DD HH24:MI:SS') AS expires_at",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(row_to_session))
}

/// Delete a session by id.
pub async fn delete_session(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

fn row_to_session(row: &sqlx::postgres::PgRow) -> Session {
    Session {
        id: row.get("id"),
        user_id: row.get("user_id"),
        ip: row.get("ip"),
        user_agent: row.get("user_agent"),
        created_at: row.get("created_at"),
        last_seen_at: row.get("last_seen_at"),
        expires_at: row.get("expires_at"),
    }
}

// =============================================================================
// EXPIRY SWEEPER
// =============================================================================

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Spawn the background task that deletes expired session rows.
/// Returns a handle for shutdown.
pub fn spawn_session_sweeper(state: AppState) -> JoinHandle<()> {
    let interval_secs = env_parse("SESSION_SWEEP_INTERVAL_SECS", DEFAULT_SESSION_SWEEP_INTERVAL_SECS);
    info!(interval_secs, "session sweeper configured");
    tokio::spawn(async move {
        loop {
            match delete_expired(&state.pool).await {
                Ok(0) => {}
                Ok(count) => info!(count, "expired sessions removed"),
                Err(e) => warn!(error = %e, "session sweep failed"),
            }
            tokio::time::sleep(Duration::from_secs(interval_secs)).await;
        }
    })
}

async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
