//! Database initialization and migration runner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup uses this module to create the shared SQLx pool and enforce schema
//! migrations before accepting API traffic. Postgres may still be coming up
//! when the server starts (compose ordering), so the first connection retries
//! with a fixed backoff before giving up.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;

const DB_CONNECT_ATTEMPTS: u32 = 11;
const DB_CONNECT_BACKOFF: Duration = Duration::from_secs(2);

fn db_max_connections() -> u32 {
    std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
}

/// Initialize the `PostgreSQL` connection pool and run migrations.
///
/// # Errors
///
/// Returns an error if the connection keeps failing or migrations fail.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = connect_with_retry(database_url, db_max_connections()).await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}

async fn connect_with_retry(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let mut attempts = 0;
    loop {
        match PgPoolOptions::new().max_connections(max_connections).connect(database_url).await {
            Ok(pool) => {
                info!("connected to postgres");
                return Ok(pool);
            }
            Err(e) => {
                attempts += 1;
                if attempts >= DB_CONNECT_ATTEMPTS {
                    return Err(e);
                }
                warn!(error = %e, attempts, "postgres not yet ready, backing off");
                tokio::time::sleep(DB_CONNECT_BACKOFF).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_max_connections_env_round_trip() {
        // Single test so reads of the fixed key never race.
        unsafe { std::env::remove_var("DB_MAX_CONNECTIONS") };
        assert_eq!(db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);

        unsafe { std::env::set_var("DB_MAX_CONNECTIONS", "7") };
        assert_eq!(db_max_connections(), 7);

        unsafe { std::env::set_var("DB_MAX_CONNECTIONS", "plenty") };
        assert_eq!(db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);

        unsafe { std::env::remove_var("DB_MAX_CONNECTIONS") };
    }
}
