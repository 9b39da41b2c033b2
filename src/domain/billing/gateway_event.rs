//! Normalized inbound gateway event.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::BillingPeriod;

/// Kind of a gateway payment event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayEventKind {
    Approved,
    Canceled,
    Refunded,
}

/// Normalized gateway webhook event, parsed from the verified JSON body.
///
/// The signature travels in the request header and is checked before this
/// structure is ever produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayEvent {
    /// Gateway-assigned transaction id; the deduplication key.
    pub transaction_id: String,
    /// Contact key of the paying account.
    pub account_reference: String,
    pub amount_cents: i64,
    pub period: BillingPeriod,
    #[serde(rename = "event_type")]
    pub kind: GatewayEventKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_parses_from_wire_json() {
        let json = r#"{
            "transaction_id": "T123",
            "account_reference": "user@example.com",
            "amount_cents": 4990,
            "period": "2026-08",
            "event_type": "approved"
        }"#;

        let event: GatewayEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.transaction_id, "T123");
        assert_eq!(event.kind, GatewayEventKind::Approved);
        assert_eq!(event.period, BillingPeriod::new(2026, 8).unwrap());
    }

    #[test]
    fn unknown_event_type_fails_parsing() {
        let json = r#"{
            "transaction_id": "T123",
            "account_reference": "user@example.com",
            "amount_cents": 100,
            "period": "2026-08",
            "event_type": "chargeback"
        }"#;

        assert!(serde_json::from_str::<GatewayEvent>(json).is_err());
    }
}
