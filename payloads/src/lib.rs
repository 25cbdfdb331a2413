//! Shared auth payloads and credential validation.
//!
//! This crate owns the request/response shapes used by both `server` and
//! `client`, plus the validation rules the two sides agree on: email syntax
//! and password length bounds. Keeping the rules here means the form can
//! reject bad input before a request is made and the server re-checks the
//! same rules on arrival.

use serde::{Deserialize, Serialize};

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN: usize = 3;
/// Maximum accepted password length, in characters.
pub const PASSWORD_MAX: usize = 20;

/// Form field a validation error attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
}

/// Why a credential field failed validation.
///
/// The display strings are shown inline next to the offending field, so they
/// are part of the contract, not free-form diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("email is required")]
    EmailRequired,
    #[error("email must be a valid address")]
    EmailInvalid,
    #[error("password is required")]
    PasswordRequired,
    #[error("password must be at least {PASSWORD_MIN} characters")]
    PasswordTooShort,
    #[error("password must be at most {PASSWORD_MAX} characters")]
    PasswordTooLong,
}

impl ValidationError {
    /// Which form field this error belongs to.
    #[must_use]
    pub fn field(self) -> Field {
        match self {
            Self::EmailRequired | Self::EmailInvalid => Field::Email,
            Self::PasswordRequired | Self::PasswordTooShort | Self::PasswordTooLong => {
                Field::Password
            }
        }
    }
}

/// Request body for both register and login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Validate both fields, email first; the first failure wins.
    ///
    /// # Errors
    ///
    /// Returns the first failing field's [`ValidationError`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        Ok(())
    }
}

/// The `{ "error": "..." }` body carried by every non-2xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// User representation returned by register and the current-user endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBody {
    /// User identifier (UUID string).
    pub id: String,
    pub email: String,
    /// Creation timestamp, pre-formatted by the server.
    pub created_at: String,
}

/// Check that `email` is a syntactically plausible address.
///
/// The shape is one `@` separating a non-empty local part from a
/// dot-separated domain: labels are alphanumeric with interior hyphens, the
/// final label is an alphabetic TLD of at least two characters, and no
/// whitespace appears anywhere.
///
/// # Errors
///
/// Returns [`ValidationError::EmailRequired`] for an empty value and
/// [`ValidationError::EmailInvalid`] for anything failing the shape check.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::EmailInvalid);
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ValidationError::EmailInvalid);
    };
    if local.is_empty() || !domain_is_valid(domain) {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}

fn domain_is_valid(domain: &str) -> bool {
    let labels = domain.split('.').collect::<Vec<_>>();
    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };
    // At least two labels: a host part and a TLD.
    if rest.is_empty() {
        return false;
    }
    rest.iter().all(|label| label_is_valid(label))
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

fn label_is_valid(label: &str) -> bool {
    if label.is_empty() || label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Check that `password` is present and within the length bounds.
///
/// Lengths count characters, not bytes.
///
/// # Errors
///
/// Returns [`ValidationError::PasswordRequired`] for an empty value, or the
/// matching bound error for one outside `[PASSWORD_MIN, PASSWORD_MAX]`.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    let len = password.chars().count();
    if len < PASSWORD_MIN {
        return Err(ValidationError::PasswordTooShort);
    }
    if len > PASSWORD_MAX {
        return Err(ValidationError::PasswordTooLong);
    }
    Ok(())
}

/// Canonical form of an email for storage and lookup: trimmed and
/// ASCII-lowercased. Validation always runs on the raw input; only the
/// stored form is normalized.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
