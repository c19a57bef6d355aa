use std::time::Duration;
use thiserror::Error;

/// Failure taxonomy for the session subsystem. Nothing here is fatal; the
/// worst outcome for a caller is a forced return to the anonymous state.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("account temporarily locked")]
    AccountLocked {
        /// Server-supplied remaining lockout duration, when present.
        remaining: Option<Duration>,
    },
    #[error("account expired")]
    AccountExpired,
    #[error("another session is already active for this user")]
    ActiveSessionConflict,
    #[error("invalid or expired one-time code")]
    InvalidCode,
    #[error("session expired")]
    SessionExpired,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("malformed server response: {0}")]
    MalformedResponse(String),
    #[error("configuration error: {0}")]
    Config(String),
}
