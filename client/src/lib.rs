//! # client
//!
//! Headless client for the auth service: typed REST calls against the
//! server plus the state models behind the sign-in and sign-up forms.
//! Field values, inline errors, and submission lifecycle all live here;
//! a UI layer renders them and forwards events back in.

pub mod net;
pub mod state;
