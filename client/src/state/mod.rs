//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `form`, `mutation`) so callers can
//! depend on small focused models. Everything here is headless: a UI
//! layer drives these structs and renders from them.

pub mod auth;
pub mod form;
pub mod mutation;
