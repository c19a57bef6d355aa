//! Expiry inspection for the opaque session token. The token is a three-part
//! compact token whose middle segment carries an `exp` claim; nothing else in
//! it is interpreted client side, and the signature is never verified here.

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Deserialize)]
struct Claims {
    exp: i64,
}

/// Embedded expiry in seconds since the epoch, or `None` when the token is
/// not a well-formed compact token.
#[must_use]
pub fn expiry(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = Base64UrlUnpadded::decode_vec(payload).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    Some(claims.exp)
}

/// True when the embedded expiry is not strictly in the future. Tokens that
/// cannot be parsed count as expired; a corrupt token is "no session",
/// never a crash.
#[must_use]
pub fn is_expired(token: &str) -> bool {
    expiry(token).is_none_or(|exp| exp <= unix_now())
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs() as i64)
}

#[cfg(test)]
pub(crate) fn make_token(expires_in_secs: i64) -> String {
    let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = serde_json::json!({ "exp": unix_now() + expires_in_secs });
    let payload = Base64UrlUnpadded::encode_string(claims.to_string().as_bytes());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}
