//! Gateway API token validation and expiry classification.
//!
//! The gateway issues JWT-shaped tokens. Validation here is purely local:
//! structure, presence of the expiry claim, and the expiry pre-check that
//! keeps an already-expired credential from ever being presented to the
//! remote system. No signature verification happens here; the gateway
//! remains the authority on token validity.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::foundation::Timestamp;

/// Days of remaining validity below which a token is flagged for renewal.
const EXPIRY_WARNING_DAYS: i64 = 7;

/// Local token validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token must have exactly three period-separated segments")]
    InvalidFormat,

    #[error("token payload carries no expiry claim")]
    MissingExpiry,

    #[error("token is already expired")]
    Expired,
}

/// Claims extracted from a structurally valid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenClaims {
    pub expires_at: Timestamp,
}

#[derive(Deserialize)]
struct RawClaims {
    exp: Option<i64>,
}

/// Validates a raw token and derives its expiry.
///
/// The token must be exactly three period-separated segments; the middle
/// segment, base64url-decoded, must be a JSON mapping with a numeric
/// `exp` claim in epoch seconds that lies in the future.
pub fn validate_token(raw: &str) -> Result<TokenClaims, TokenError> {
    let segments: Vec<&str> = raw.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::InvalidFormat);
    }

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1])
        .map_err(|_| TokenError::InvalidFormat)?;
    let claims: RawClaims =
        serde_json::from_slice(&payload).map_err(|_| TokenError::InvalidFormat)?;

    let exp = claims.exp.ok_or(TokenError::MissingExpiry)?;
    let expires_at = Timestamp::from_unix_secs(exp);

    if expires_at <= Timestamp::now() {
        return Err(TokenError::Expired);
    }

    Ok(TokenClaims { expires_at })
}

/// Health of a credential relative to its expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenHealth {
    Valid,
    /// Seven days or less of validity remain; operators should renew.
    Expiring,
    Expired,
}

/// Classifies an expiry timestamp against `now`.
pub fn classify(expires_at: Timestamp, now: Timestamp) -> TokenHealth {
    if now.is_after(&expires_at) {
        return TokenHealth::Expired;
    }
    let remaining = expires_at.duration_since(&now);
    if remaining <= chrono::Duration::days(EXPIRY_WARNING_DAYS) {
        TokenHealth::Expiring
    } else {
        TokenHealth::Valid
    }
}
