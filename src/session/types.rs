//! Core session data types and the wire payloads exchanged with the backend
//! auth endpoints. The cached profile is written once at verify-login and is
//! never refreshed automatically; UI code reading it may see stale data.

use serde::{Deserialize, Serialize};

/// Actor classification read from the cached profile. Membership is
/// exact-match only, there is no hierarchy between roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Dealer,
    Customer,
}

impl Role {
    /// Landing route for the role, used when a guard bounces an
    /// authenticated actor off a route it may not visit.
    #[must_use]
    pub const fn home_path(self) -> &'static str {
        match self {
            Self::Admin => "/admin",
            Self::Dealer => "/dealer",
            Self::Customer => "/customer",
        }
    }
}

/// Denormalized snapshot of the authenticated user, persisted next to the
/// session token and cleared together with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

/// Ephemeral state held in memory between the password step and the OTP
/// step. Never persisted; a process restart while mid-OTP starts over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLogin {
    /// Address the one-time code was sent to, possibly masked for display.
    pub email: String,
    pub awaiting_code: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    #[serde(rename = "forceLogin", skip_serializing_if = "Option::is_none")]
    pub force_login: Option<bool>,
}

/// Successful password-step response. No token is issued yet; the backend
/// has only dispatched the one-time code.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginAccepted {
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LoginErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "remainingBlockTime")]
    pub remaining_block_time: Option<u64>,
    #[serde(rename = "hasActiveSession", default)]
    pub has_active_session: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct VerifyLoginRequest<'a> {
    pub email: &'a str,
    pub otp: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyLoginResponse {
    pub token: String,
    pub id: String,
    pub email: String,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub last_login: Option<String>,
}

/// Outcome of a successful OTP exchange: the bearer token plus the initial
/// profile snapshot.
#[derive(Debug, Clone)]
pub struct VerifiedSession {
    pub token: String,
    pub profile: UserProfile,
}

impl From<VerifyLoginResponse> for VerifiedSession {
    fn from(response: VerifyLoginResponse) -> Self {
        Self {
            token: response.token,
            profile: UserProfile {
                id: response.id,
                username: response.username,
                email: response.email,
                role: response.role,
                last_login: response.last_login,
            },
        }
    }
}
