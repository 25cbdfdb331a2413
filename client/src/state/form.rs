#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use payloads::{Credentials, Field, ValidationError, validate_email, validate_password};

use super::mutation::Mutation;

/// Which auth page the form is driving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

/// Inline validation messages keyed by input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Attach a validation failure to its field.
    pub fn record(&mut self, error: &ValidationError) {
        let message = error.to_string();
        match error.field() {
            Field::Email => self.email = Some(message),
            Field::Password => self.password = Some(message),
        }
    }
}

/// Headless model behind the sign-in and sign-up forms.
///
/// The resolver runs on submit; once it has run, every edit re-validates
/// so fixing a value clears its inline error immediately. At most one
/// request is outstanding: `begin_submit` yields nothing while pending.
#[derive(Clone, Debug, Default)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub errors: FieldErrors,
    pub mutation: Mutation,
    validated_once: bool,
}

impl AuthForm {
    #[must_use]
    pub fn new(mode: AuthMode) -> Self {
        Self { mode, ..Self::default() }
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        if self.validated_once {
            self.revalidate();
        }
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        if self.validated_once {
            self.revalidate();
        }
    }

    /// Whether the submit control should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.mutation.is_pending() && self.errors.is_empty()
    }

    /// Run the resolver. A clean pass enters pending and yields the payload
    /// to send; otherwise the per-field errors are recorded and nothing is
    /// yielded. Also yields nothing while a request is already in flight.
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.mutation.is_pending() {
            return None;
        }

        self.validated_once = true;
        self.revalidate();
        if !self.errors.is_empty() {
            return None;
        }

        self.mutation.begin();
        Some(Credentials { email: self.email.clone(), password: self.password.clone() })
    }

    /// Fold the request outcome back into the form. A server message lands
    /// on the email field, which is where callers surface it.
    pub fn complete(&mut self, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => {
                self.mutation.succeed();
                self.errors.clear();
            }
            Err(message) => {
                self.errors.email = Some(message.clone());
                self.mutation.fail(message);
            }
        }
    }

    fn revalidate(&mut self) {
        self.errors.clear();
        if let Err(e) = validate_email(&self.email) {
            self.errors.record(&e);
        }
        if let Err(e) = validate_password(&self.password) {
            self.errors.record(&e);
        }
    }
}
