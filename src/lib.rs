//! Client-side session lifecycle for the dealer management platform.
//!
//! The [`session`] module owns the authentication token and cached user
//! profile, drives the two-step (password + emailed one-time code) login
//! handshake against the backend REST API, and answers role-based guard
//! questions for route-level access decisions. The [`cli`] module wraps it
//! in a small terminal client.

pub mod cli;
pub mod session;

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
