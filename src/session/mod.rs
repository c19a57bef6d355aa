//! Session manager: the single source of truth for "is there a currently
//! authenticated actor, and who are they". Owns the persisted token/profile
//! pair through an injected [`SessionStore`] and the in-memory pending-login
//! challenge, and drives the two-step login handshake.
//!
//! Lifecycle per process: anonymous → credentials accepted (awaiting code)
//! → authenticated, with expiry detection, logout, or a backend 401 forcing
//! the way back to anonymous. The pending challenge never survives a
//! restart.

pub mod client;
pub mod error;
pub mod guard;
pub mod store;
pub mod token;
pub mod types;

use client::AuthClient;
use error::AuthError;
use secrecy::SecretString;
use std::sync::{Arc, Mutex, PoisonError};
use store::SessionStore;
use tracing::{debug, warn};
use types::{PendingLogin, UserProfile};

pub struct SessionManager {
    client: AuthClient,
    store: Arc<dyn SessionStore>,
    pending: Mutex<Option<PendingLogin>>,
}

impl SessionManager {
    #[must_use]
    pub fn new(client: AuthClient, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            store,
            pending: Mutex::new(None),
        }
    }

    /// Password step. On success the backend has emailed a one-time code and
    /// the returned challenge is held until [`verify_login`] or
    /// [`cancel_login`]. A rejected conflict ([`AuthError::ActiveSessionConflict`])
    /// leaves no local state behind; the caller decides whether to take over
    /// via [`force_login`].
    ///
    /// [`verify_login`]: Self::verify_login
    /// [`cancel_login`]: Self::cancel_login
    /// [`force_login`]: Self::force_login
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<PendingLogin, AuthError> {
        self.login_with(username, password, false).await
    }

    /// Resubmits the credentials with the override flag, invalidating the
    /// other session server-side. The only path past an active-session
    /// conflict.
    pub async fn force_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<PendingLogin, AuthError> {
        self.login_with(username, password, true).await
    }

    async fn login_with(
        &self,
        username: &str,
        password: &str,
        force: bool,
    ) -> Result<PendingLogin, AuthError> {
        let accepted = self.client.login(username, password, force).await?;
        let challenge = PendingLogin {
            email: accepted.email,
            awaiting_code: true,
        };
        *self.pending_slot() = Some(challenge.clone());
        debug!("credentials accepted, awaiting one-time code");
        Ok(challenge)
    }

    /// OTP step. On success the token and profile are persisted together and
    /// the challenge is dropped. On [`AuthError::InvalidCode`] the challenge
    /// stays pending so the user can retry with a fresh code.
    pub async fn verify_login(
        &self,
        email: &str,
        otp: u32,
    ) -> Result<UserProfile, AuthError> {
        let verified = self.client.verify_login(email, otp).await?;

        let profile_json = serde_json::to_string(&verified.profile)
            .map_err(|err| AuthError::MalformedResponse(err.to_string()))?;
        self.store.write(&verified.token, &profile_json);
        *self.pending_slot() = None;

        debug!(username = %verified.profile.username, "login verified");
        Ok(verified.profile)
    }

    /// Drops the pending challenge, returning to the anonymous state.
    pub fn cancel_login(&self) {
        *self.pending_slot() = None;
    }

    /// Current challenge, if the password step has succeeded and the code
    /// has not been redeemed yet.
    #[must_use]
    pub fn pending_login(&self) -> Option<PendingLogin> {
        self.pending_slot().clone()
    }

    /// Ends the session. Local state is fully cleared before this returns;
    /// the backend is notified on a spawned task and a failure there is
    /// logged, never surfaced. Safe to call with no session at all.
    pub fn logout(&self) {
        if let Some(token) = self.clear_local() {
            let client = self.client.clone();
            tokio::spawn(async move {
                if let Err(err) = client.logout(&SecretString::from(token)).await {
                    debug!(%err, "backend logout notification failed");
                }
            });
        }
    }

    /// [`logout`](Self::logout), but waits for the backend acknowledgement.
    /// CLI flows use this so the process does not exit before the request
    /// leaves. Local state is still cleared before the network call starts.
    pub async fn logout_and_wait(&self) {
        if let Some(token) = self.clear_local() {
            if let Err(err) = self.client.logout(&SecretString::from(token)).await {
                debug!(%err, "backend logout notification failed");
            }
        }
    }

    fn clear_local(&self) -> Option<String> {
        let token = self.store.read_token();
        self.store.clear();
        *self.pending_slot() = None;
        token
    }

    /// True iff a token is present and its embedded expiry is strictly in
    /// the future. Never touches the network.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store
            .read_token()
            .is_some_and(|stored| !token::is_expired(&stored))
    }

    /// Pure read of the cached profile. Absent or unparsable cache is `None`.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        let raw = self.store.read_profile()?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(err) => {
                warn!(%err, "discarding unparsable cached profile");
                None
            }
        }
    }

    /// Bearer token for authenticated page-level requests. A missing or
    /// expired token clears the session (forced logout) and reports
    /// [`AuthError::SessionExpired`].
    pub fn auth_token(&self) -> Result<SecretString, AuthError> {
        match self.store.read_token() {
            Some(stored) if !token::is_expired(&stored) => Ok(SecretString::from(stored)),
            Some(_) => {
                debug!("stored token expired, forcing logout");
                self.handle_unauthorized();
                Err(AuthError::SessionExpired)
            }
            None => Err(AuthError::SessionExpired),
        }
    }

    /// Forced local logout for callers whose authenticated request came back
    /// 401. Only clears local state; the server already considers the
    /// session dead.
    pub fn handle_unauthorized(&self) {
        self.clear_local();
    }

    fn pending_slot(&self) -> std::sync::MutexGuard<'_, Option<PendingLogin>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
