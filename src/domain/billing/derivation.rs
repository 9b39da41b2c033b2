//! Account status derivation from ledger contents.
//!
//! Reconciliation never patches account status incrementally: the ledger
//! write lands first, then the status is recomputed from the ledger slice
//! alone. Replays and partial application therefore converge to the same
//! end state, and a crash between the two writes is healed by the next
//! derivation pass.

use crate::domain::account::AccountStatus;
use crate::domain::billing::{GatewayEventKind, PaymentRecord, RecordOrigin};

/// Derives the account status implied by a slice of that account's
/// ledger records.
///
/// Only gateway-journaled records participate; manual submissions and
/// admin corrections do not move the status automatically. The most
/// recent gateway record (by creation time, transaction id as
/// tie-breaker) wins. Returns `None` when the ledger holds no gateway
/// records, meaning the status stays whatever it was.
pub fn derived_status(records: &[PaymentRecord]) -> Option<AccountStatus> {
    let latest = records
        .iter()
        .filter_map(|r| match r.origin {
            RecordOrigin::Gateway { event } => Some((r, event)),
            _ => None,
        })
        .max_by(|(a, _), (b, _)| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.transaction_id.cmp(&b.transaction_id))
        })?;

    Some(match latest.1 {
        GatewayEventKind::Approved => AccountStatus::Active,
        GatewayEventKind::Canceled => AccountStatus::Canceled,
        GatewayEventKind::Refunded => AccountStatus::Refunded,
    })
}

/// User-visible block reason for a derived blocking status.
pub fn block_reason_for(status: AccountStatus) -> Option<String> {
    match status {
        AccountStatus::Canceled => Some("subscription canceled at the payment gateway".to_string()),
        AccountStatus::Refunded => Some("payment was refunded".to_string()),
        _ => None,
    }
}
