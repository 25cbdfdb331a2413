//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware views to coordinate login redirects
//! and identity-dependent rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use payloads::UserBody;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<UserBody>,
    pub loading: bool,
}

impl AuthState {
    /// A `current_user` fetch is in flight.
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Fold a `current_user` result in; `None` means signed out.
    pub fn resolve(&mut self, user: Option<UserBody>) {
        self.user = user;
        self.loading = false;
    }

    /// Local effect of a logout.
    pub fn clear(&mut self) {
        self.user = None;
        self.loading = false;
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}
