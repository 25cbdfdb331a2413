//! User store — registration, lookup, password verification.

use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Unique constraint on `users.email`, as named in the migration.
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("user with this email already exists")]
    EmailTaken,
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// User row as exposed to handlers. Never carries the password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Creation timestamp, formatted by Postgres.
    pub created_at: String,
}

/// Row needed to verify a login attempt.
#[derive(Debug)]
pub struct StoredCredentials {
    pub id: Uuid,
    pub password_hash: String,
}

/// Bcrypt-hash a password at the default cost.
pub fn hash_password(password: &str) -> Result<String, UserError> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

/// Compare a password against a stored bcrypt hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, UserError> {
    Ok(bcrypt::verify(password, password_hash)?)
}

/// Insert a new user with a bcrypt-hashed password.
///
/// The email is normalized before storage so lookups are case-insensitive.
///
/// # Errors
///
/// Returns [`UserError::EmailTaken`] when the email is already registered.
pub async fn create_user(pool: &PgPool, email: &str, password: &str) -> Result<User, UserError> {
    let normalized = payloads::normalize_email(email);
    let password_hash = hash_password(password)?;

    let row = sqlx::query(
        r"INSERT INTO users (email, password_hash)
          VALUES ($1, $2)
          RETURNING id, email, to_char(created_at, 'YYYY-MM-DD HH24:MI:SS') AS created_at",
    )
    .bind(&normalized)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_email_conflict(&e) {
            UserError::EmailTaken
        } else {
            UserError::Db(e)
        }
    })?;

    Ok(row_to_user(&row))
}

/// Look up the stored credentials for an email, if registered.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<StoredCredentials>, UserError> {
    let row = sqlx::query("SELECT id, password_hash FROM users WHERE email = $1")
        .bind(payloads::normalize_email(email))
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| StoredCredentials { id: r.get("id"), password_hash: r.get("password_hash") }))
}

/// Look up a user by id. The hash is never selected.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, UserError> {
    let row = sqlx::query(
        r"SELECT id, email, to_char(created_at, 'YYYY-MM-DD HH24:MI:SS') AS created_at
          FROM users
          WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(row_to_user))
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> User {
    User { id: row.get("id"), email: row.get("email"), created_at: row.get("created_at") }
}

fn is_email_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT),
        _ => false,
    }
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
