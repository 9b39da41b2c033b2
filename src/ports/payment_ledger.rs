//! Payment ledger port.

use async_trait::async_trait;

use crate::domain::billing::PaymentRecord;
use crate::domain::foundation::{AccountId, BillingPeriod, DomainError};

/// Outcome of inserting a gateway-journaled record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was written.
    Inserted,
    /// A record with the same transaction id already exists; nothing was
    /// written. First writer wins under concurrent delivery.
    DuplicateTransaction,
}

/// Append/update store of payment records per account per billing period.
///
/// Implementations enforce the two ledger invariants: transaction-id
/// uniqueness across all records, and at most one record with `Approved`
/// status per (account, period). A newly inserted approval supersedes an
/// earlier one for the same account and period, demoting it to `Rejected`
/// while keeping it journaled for audit.
#[async_trait]
pub trait PaymentLedger: Send + Sync {
    /// Inserts a record, deduplicating on its gateway transaction id.
    ///
    /// Records without a transaction id (manual submissions) are always
    /// inserted.
    async fn insert(&self, record: PaymentRecord) -> Result<InsertOutcome, DomainError>;

    /// Finds the record journaled for a gateway transaction id.
    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<PaymentRecord>, DomainError>;

    /// All records for one account, any period.
    async fn find_for_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<PaymentRecord>, DomainError>;

    /// All records for one billing period, any account.
    async fn list_for_period(
        &self,
        period: &BillingPeriod,
    ) -> Result<Vec<PaymentRecord>, DomainError>;

    /// Every record in the ledger; the sweep's triage annotations are
    /// computed from this snapshot.
    async fn list_all(&self) -> Result<Vec<PaymentRecord>, DomainError>;
}
