//! Slack request signing (`v0` scheme).
//!
//! Slack signs `v0:{timestamp}:{raw body}` with HMAC-SHA256 keyed by the app's
//! signing secret and sends `v0={hex digest}` in `x-slack-signature`.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Requests older (or newer) than this many seconds are rejected as replays.
pub const MAX_CLOCK_SKEW_SECS: i64 = 300;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("missing {0} header")]
    MissingHeader(&'static str),

    #[error("request timestamp is not an integer")]
    BadTimestamp,

    #[error("request timestamp is outside the {MAX_CLOCK_SKEW_SECS}s window")]
    Stale,

    #[error("signature does not match")]
    Mismatch,
}

/// Checks `signature` against the expected digest of `timestamp` and `body`.
///
/// `now` is the current unix time in seconds.
///
/// # Errors
///
/// Returns [`SignatureError`] describing the first failed check.
pub fn verify(
    secret: &str,
    timestamp: Option<&str>,
    signature: Option<&str>,
    body: &[u8],
    now: i64,
) -> Result<(), SignatureError> {
    let timestamp = timestamp.ok_or(SignatureError::MissingHeader("x-slack-request-timestamp"))?;
    let signature = signature.ok_or(SignatureError::MissingHeader("x-slack-signature"))?;

    let sent_at: i64 = timestamp
        .trim()
        .parse()
        .map_err(|_| SignatureError::BadTimestamp)?;
    if now.abs_diff(sent_at) > MAX_CLOCK_SKEW_SECS.unsigned_abs() {
        return Err(SignatureError::Stale);
    }

    let expected = sign(secret, timestamp.trim(), body);
    if bool::from(expected.as_bytes().ct_eq(signature.trim().as_bytes())) {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

/// Computes the `v0=...` signature Slack would send for this request.
#[must_use]
pub fn sign(secret: &str, timestamp: &str, body: &[u8]) -> String {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(b"v0:");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);
    format!("v0={}", hex::encode(mac.finalize().into_bytes()))
}
