//! Networking modules for the auth REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the HTTP client and the error-to-message collapse; the wire
//! shapes themselves live in the shared `payloads` crate.

pub mod api;
