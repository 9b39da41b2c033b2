//! Payment record entity and its status/origin enumerations.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, BillingPeriod, PaymentRecordId, Timestamp};

use super::GatewayEventKind;

/// Verification status of a payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Manually submitted proof awaiting human verification.
    PendingVerification,
    /// Confirmed payment; counts as coverage for its period.
    Approved,
    /// Rejected or voided; does not count as coverage.
    Rejected,
}

impl PaymentStatus {
    /// Returns true if this record covers its billing period for the
    /// delinquency sweep (approved, or submitted and awaiting review).
    pub fn covers_period(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Approved | PaymentStatus::PendingVerification
        )
    }
}

/// How a record entered the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordOrigin {
    /// Human-in-the-loop proof-of-payment upload.
    ManualUpload,
    /// Journaled from a verified gateway webhook event.
    Gateway { event: GatewayEventKind },
    /// Operator correction.
    AdminCorrection,
}

/// One payment record per account per billing period event.
///
/// Invariants enforced by the ledger: at most one record holds `Approved`
/// status per (account, period) at any time (a newer approval supersedes
/// the old one); gateway transaction ids are unique across all records
/// (replay protection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentRecordId,
    pub account_id: AccountId,
    pub period: BillingPeriod,
    /// Amount in the smallest currency unit. Zero for provisional
    /// manual submissions pending verification.
    pub amount_cents: i64,
    pub status: PaymentStatus,
    pub origin: RecordOrigin,
    /// Durable reference URL of an uploaded proof, if any.
    pub proof_reference: Option<String>,
    /// Gateway transaction id; present on gateway-journaled records.
    pub transaction_id: Option<String>,
    pub created_at: Timestamp,
    pub paid_at: Option<Timestamp>,
}

impl PaymentRecord {
    /// Record for an approved gateway event.
    pub fn gateway_approved(
        account_id: AccountId,
        period: BillingPeriod,
        amount_cents: i64,
        transaction_id: impl Into<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: PaymentRecordId::new(),
            account_id,
            period,
            amount_cents,
            status: PaymentStatus::Approved,
            origin: RecordOrigin::Gateway {
                event: GatewayEventKind::Approved,
            },
            proof_reference: None,
            transaction_id: Some(transaction_id.into()),
            created_at: now,
            paid_at: Some(now),
        }
    }

    /// Journal entry for a canceled or refunded gateway event.
    ///
    /// Rejected records keep the transaction id so replays deduplicate,
    /// but never count as coverage.
    pub fn gateway_voided(
        account_id: AccountId,
        period: BillingPeriod,
        amount_cents: i64,
        transaction_id: impl Into<String>,
        event: GatewayEventKind,
    ) -> Self {
        Self {
            id: PaymentRecordId::new(),
            account_id,
            period,
            amount_cents,
            status: PaymentStatus::Rejected,
            origin: RecordOrigin::Gateway { event },
            proof_reference: None,
            transaction_id: Some(transaction_id.into()),
            created_at: Timestamp::now(),
            paid_at: None,
        }
    }

    /// Record for a manual proof-of-payment submission.
    ///
    /// Amount is provisional (zero) until manual verification sets it.
    pub fn manual_submission(
        account_id: AccountId,
        period: BillingPeriod,
        proof_reference: impl Into<String>,
    ) -> Self {
        Self {
            id: PaymentRecordId::new(),
            account_id,
            period,
            amount_cents: 0,
            status: PaymentStatus::PendingVerification,
            origin: RecordOrigin::ManualUpload,
            proof_reference: Some(proof_reference.into()),
            transaction_id: None,
            created_at: Timestamp::now(),
            paid_at: None,
        }
    }
}
