//! Route guarding as a pure decision. The guard never navigates; it returns
//! an intent and the caller performs the redirect, which keeps the logic
//! testable without any navigation machinery.

use super::{types::Role, SessionManager};

/// Outcome of a guard check for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Anonymous actor: send to the login entry point and keep the attempted
    /// path for the post-login return.
    RedirectToLogin { return_to: String },
    /// Authenticated but the wrong role for this route: send to that role's
    /// own home.
    Redirect { target: &'static str },
}

/// Decides whether the current actor may visit `current_path`. An empty
/// `required_roles` means any authenticated actor is allowed. A valid token
/// with an unreadable profile counts as anonymous, since no role can be
/// established for it.
#[must_use]
pub fn guard(
    manager: &SessionManager,
    required_roles: &[Role],
    current_path: &str,
) -> GuardDecision {
    if !manager.is_authenticated() {
        return GuardDecision::RedirectToLogin {
            return_to: current_path.to_string(),
        };
    }

    let Some(profile) = manager.current_user() else {
        return GuardDecision::RedirectToLogin {
            return_to: current_path.to_string(),
        };
    };

    if required_roles.is_empty() || required_roles.contains(&profile.role) {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect {
            target: profile.role.home_path(),
        }
    }
}

/// Login entry point carrying the return path, e.g.
/// `/login?returnUrl=%2Fadmin%2Fvehicles`.
#[must_use]
pub fn login_url(return_to: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("returnUrl", return_to)
        .finish();
    format!("/login?{query}")
}
