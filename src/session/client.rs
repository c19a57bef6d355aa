//! HTTP client for the backend auth endpoints. Centralizes status-to-error
//! mapping so callers only ever see the typed [`AuthError`] taxonomy, and
//! never logs credentials, codes, or token material.

use crate::{
    session::{
        error::AuthError,
        types::{
            LoginAccepted, LoginErrorBody, LoginRequest, VerifiedSession, VerifyLoginRequest,
            VerifyLoginResponse,
        },
    },
    APP_USER_AGENT,
};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

#[derive(Debug, Clone)]
pub struct AuthClient {
    http: Client,
    base_url: String,
}

impl AuthClient {
    /// Builds a client against the API base URL, for example
    /// `http://localhost:8080/api`.
    pub fn new(base_url: &str) -> Result<Self, AuthError> {
        let parsed =
            Url::parse(base_url).map_err(|err| AuthError::Config(format!("invalid API URL: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AuthError::Config(format!(
                "unsupported API URL scheme: {}",
                parsed.scheme()
            )));
        }

        let http = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Password step. On success the backend has dispatched a one-time code
    /// and answers with the (possibly masked) destination address; no token
    /// is issued yet.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        force: bool,
    ) -> Result<LoginAccepted, AuthError> {
        let body = LoginRequest {
            username,
            password,
            force_login: force.then_some(true),
        };

        let response = self
            .http
            .post(self.endpoint("/auth/login"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<LoginAccepted>()
                .await
                .map_err(|err| AuthError::MalformedResponse(err.to_string()));
        }

        let body: LoginErrorBody = response.json().await.unwrap_or_default();
        debug!(%status, "login rejected");

        Err(match status {
            StatusCode::CONFLICT if body.has_active_session => AuthError::ActiveSessionConflict,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => classify_denied(&body),
            _ => AuthError::MalformedResponse(format!("unexpected status {status}")),
        })
    }

    /// OTP step. Exchanges the emailed code for the session token and the
    /// initial profile snapshot. Any 4xx means the code was wrong or stale
    /// and the caller may retry with a fresh one.
    #[instrument(skip(self, otp))]
    pub async fn verify_login(&self, email: &str, otp: u32) -> Result<VerifiedSession, AuthError> {
        let body = VerifyLoginRequest { email, otp };

        let response = self
            .http
            .post(self.endpoint("/auth/verify-login"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let verified: VerifyLoginResponse = response
                .json()
                .await
                .map_err(|err| AuthError::MalformedResponse(err.to_string()))?;
            return Ok(verified.into());
        }

        debug!(%status, "verify-login rejected");
        if status.is_client_error() {
            Err(AuthError::InvalidCode)
        } else {
            Err(AuthError::MalformedResponse(format!(
                "unexpected status {status}"
            )))
        }
    }

    /// Server-side session invalidation. The response body is ignored; the
    /// caller clears local state regardless of the outcome here.
    #[instrument(skip_all)]
    pub async fn logout(&self, token: &SecretString) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.endpoint("/auth/logout"))
            .bearer_auth(token.expose_secret())
            .json(&serde_json::json!({}))
            .send()
            .await?;

        debug!(status = %response.status(), "logout acknowledged");
        Ok(())
    }
}

/// 401/403 bodies are loosely shaped; a `remainingBlockTime` field marks a
/// lockout, an error message mentioning expiry marks a dead account, and
/// everything else is a plain credential rejection.
fn classify_denied(body: &LoginErrorBody) -> AuthError {
    if let Some(seconds) = body.remaining_block_time {
        return AuthError::AccountLocked {
            remaining: Some(Duration::from_secs(seconds)),
        };
    }

    let message = body
        .error
        .as_deref()
        .or(body.message.as_deref())
        .unwrap_or_default()
        .to_lowercase();

    if message.contains("locked") {
        AuthError::AccountLocked { remaining: None }
    } else if message.contains("account has expired") || message.contains("account expired") {
        AuthError::AccountExpired
    } else {
        AuthError::InvalidCredentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_urls() {
        assert!(AuthClient::new("ftp://host/api").is_err());
        assert!(AuthClient::new("not a url").is_err());
        assert!(AuthClient::new("http://localhost:8080/api").is_ok());
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = AuthClient::new("http://localhost:8080/api/").unwrap();
        assert_eq!(
            client.endpoint("/auth/login"),
            "http://localhost:8080/api/auth/login"
        );
    }

    #[test]
    fn test_classify_denied() {
        let locked = LoginErrorBody {
            remaining_block_time: Some(120),
            ..Default::default()
        };
        assert!(matches!(
            classify_denied(&locked),
            AuthError::AccountLocked {
                remaining: Some(d)
            } if d.as_secs() == 120
        ));

        let locked_no_time = LoginErrorBody {
            error: Some("Account temporarily locked".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            classify_denied(&locked_no_time),
            AuthError::AccountLocked { remaining: None }
        ));

        let expired = LoginErrorBody {
            error: Some("Your account has expired. Please contact support.".to_string()),
            ..Default::default()
        };
        assert!(matches!(classify_denied(&expired), AuthError::AccountExpired));

        let plain = LoginErrorBody {
            message: Some("Invalid username or password".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            classify_denied(&plain),
            AuthError::InvalidCredentials
        ));

        assert!(matches!(
            classify_denied(&LoginErrorBody::default()),
            AuthError::InvalidCredentials
        ));
    }
}
