//! Gateway webhook signature verification.
//!
//! Events are signed with HMAC-SHA256 over `"{timestamp}.{body}"` using the
//! tenant's shared webhook secret, carried in the `X-Gateway-Signature`
//! header as `t=<unix>,v1=<hex>`. Verification is constant-time and bounds
//! the signature timestamp to a short window.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::{GatewayEvent, ReconcileError};

/// Maximum allowed age for signed events (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Maximum allowed clock skew for future timestamps (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components of the signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// v1 signature (HMAC-SHA256).
    pub v1_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parses a `t=<timestamp>,v1=<hex>` header value.
    ///
    /// Unknown fields are ignored for forward compatibility.
    pub fn parse(header: &str) -> Result<Self, ReconcileError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                ReconcileError::MalformedPayload("invalid signature header format".to_string())
            })?;

            match key {
                "t" => {
                    timestamp = Some(value.parse().map_err(|_| {
                        ReconcileError::MalformedPayload(
                            "invalid signature timestamp".to_string(),
                        )
                    })?);
                }
                "v1" => {
                    v1_signature = Some(hex::decode(value).map_err(|_| {
                        ReconcileError::MalformedPayload("invalid signature hex".to_string())
                    })?);
                }
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or_else(|| {
            ReconcileError::MalformedPayload("missing signature timestamp".to_string())
        })?;
        let v1_signature = v1_signature.ok_or_else(|| {
            ReconcileError::MalformedPayload("missing v1 signature".to_string())
        })?;

        Ok(SignatureHeader {
            timestamp,
            v1_signature,
        })
    }
}

/// Verifier for inbound gateway webhook signatures.
pub struct GatewayWebhookVerifier {
    secret: String,
}

impl GatewayWebhookVerifier {
    /// Creates a verifier bound to the tenant's shared webhook secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies the signature and parses the event body.
    ///
    /// A mismatched signature yields `SignatureMismatch` with zero state
    /// read or mutated beyond the comparison itself; callers treat it as
    /// a potential-tampering signal.
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<GatewayEvent, ReconcileError> {
        let header = SignatureHeader::parse(signature_header)?;

        self.validate_timestamp(header.timestamp)?;

        let expected = self.compute_signature(header.timestamp, payload);
        if !constant_time_compare(&expected, &header.v1_signature) {
            return Err(ReconcileError::SignatureMismatch);
        }

        serde_json::from_slice(payload)
            .map_err(|e| ReconcileError::MalformedPayload(e.to_string()))
    }

    fn validate_timestamp(&self, timestamp: i64) -> Result<(), ReconcileError> {
        let now = chrono::Utc::now().timestamp();
        let age = now - timestamp;

        if age > MAX_EVENT_AGE_SECS || age < -MAX_CLOCK_SKEW_SECS {
            return Err(ReconcileError::StaleSignature);
        }
        Ok(())
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));

        let mut mac =
            Hmac::<Sha256>::new_from_slice(self.secret.as_bytes()).expect("HMAC accepts any key");
        mac.update(signed_payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes a `t=...,v1=...` signature header value for a payload.
///
/// Counterpart of [`GatewayWebhookVerifier::verify_and_parse`]; used by
/// test fixtures and operator tooling that replays events.
pub fn compute_signature_header(secret: &str, timestamp: i64, payload: &str) -> String {
    let signed_payload = format!("{}.{}", timestamp, payload);
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(signed_payload.as_bytes());
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "whsec_test_secret_12345";

    const VALID_BODY: &str = r#"{
        "transaction_id": "T123",
        "account_reference": "user@example.com",
        "amount_cents": 4990,
        "period": "2026-08",
        "event_type": "approved"
    }"#;

    #[test]
    fn parse_header_extracts_timestamp_and_signature() {
        let header_str = format!("t=1234567890,v1={}", "a".repeat(64));
        let header = SignatureHeader::parse(&header_str).unwrap();
        assert_eq!(header.timestamp, 1234567890);
        assert_eq!(header.v1_signature.len(), 32);
    }

    #[test]
    fn parse_header_ignores_unknown_fields() {
        let header_str = format!("t=1234567890,v1={},v2=future", "a".repeat(64));
        assert!(SignatureHeader::parse(&header_str).is_ok());
    }

    #[test]
    fn parse_header_missing_parts_fails() {
        assert!(SignatureHeader::parse("t=1234567890").is_err());
        assert!(SignatureHeader::parse(&format!("v1={}", "a".repeat(64))).is_err());
        assert!(SignatureHeader::parse("t=nan,v1=aa").is_err());
        assert!(SignatureHeader::parse("t=1,v1=zz").is_err());
    }

    #[test]
    fn verify_accepts_correctly_signed_event() {
        let verifier = GatewayWebhookVerifier::new(TEST_SECRET);
        let now = chrono::Utc::now().timestamp();
        let header = compute_signature_header(TEST_SECRET, now, VALID_BODY);

        let event = verifier
            .verify_and_parse(VALID_BODY.as_bytes(), &header)
            .unwrap();
        assert_eq!(event.transaction_id, "T123");
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let verifier = GatewayWebhookVerifier::new("someone_elses_secret");
        let now = chrono::Utc::now().timestamp();
        let header = compute_signature_header(TEST_SECRET, now, VALID_BODY);

        let result = verifier.verify_and_parse(VALID_BODY.as_bytes(), &header);
        assert!(matches!(result, Err(ReconcileError::SignatureMismatch)));
    }

    #[test]
    fn verify_rejects_tampered_payload() {
        let verifier = GatewayWebhookVerifier::new(TEST_SECRET);
        let now = chrono::Utc::now().timestamp();
        let header = compute_signature_header(TEST_SECRET, now, VALID_BODY);
        let tampered = VALID_BODY.replace("4990", "1");

        let result = verifier.verify_and_parse(tampered.as_bytes(), &header);
        assert!(matches!(result, Err(ReconcileError::SignatureMismatch)));
    }

    #[test]
    fn verify_rejects_old_timestamp() {
        let verifier = GatewayWebhookVerifier::new(TEST_SECRET);
        let old = chrono::Utc::now().timestamp() - MAX_EVENT_AGE_SECS - 1;
        let header = compute_signature_header(TEST_SECRET, old, VALID_BODY);

        let result = verifier.verify_and_parse(VALID_BODY.as_bytes(), &header);
        assert!(matches!(result, Err(ReconcileError::StaleSignature)));
    }

    #[test]
    fn verify_tolerates_small_clock_skew() {
        let verifier = GatewayWebhookVerifier::new(TEST_SECRET);
        let future = chrono::Utc::now().timestamp() + 30;
        let header = compute_signature_header(TEST_SECRET, future, VALID_BODY);

        assert!(verifier
            .verify_and_parse(VALID_BODY.as_bytes(), &header)
            .is_ok());
    }

    #[test]
    fn verify_rejects_far_future_timestamp() {
        let verifier = GatewayWebhookVerifier::new(TEST_SECRET);
        let future = chrono::Utc::now().timestamp() + MAX_CLOCK_SKEW_SECS + 60;
        let header = compute_signature_header(TEST_SECRET, future, VALID_BODY);

        let result = verifier.verify_and_parse(VALID_BODY.as_bytes(), &header);
        assert!(matches!(result, Err(ReconcileError::StaleSignature)));
    }

    #[test]
    fn verify_valid_signature_but_malformed_body_fails_parse() {
        let verifier = GatewayWebhookVerifier::new(TEST_SECRET);
        let body = "not json";
        let now = chrono::Utc::now().timestamp();
        let header = compute_signature_header(TEST_SECRET, now, body);

        let result = verifier.verify_and_parse(body.as_bytes(), &header);
        assert!(matches!(result, Err(ReconcileError::MalformedPayload(_))));
    }

    #[test]
    fn constant_time_compare_handles_length_mismatch() {
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 3, 4]));
        assert!(constant_time_compare(&[1, 2, 3], &[1, 2, 3]));
    }

    proptest::proptest! {
        // Header values arrive from the network; parsing must reject
        // garbage with an error, never a panic.
        #[test]
        fn parse_header_never_panics(header in ".{0,120}") {
            let _ = SignatureHeader::parse(&header);
        }
    }
}
