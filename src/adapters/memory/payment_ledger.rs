//! In-memory payment ledger.
//!
//! Enforces the two ledger invariants inside a single write lock, so
//! concurrent webhook deliveries see first-writer-wins deduplication.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::billing::{PaymentRecord, PaymentStatus};
use crate::domain::foundation::{AccountId, BillingPeriod, DomainError};
use crate::ports::{InsertOutcome, PaymentLedger};

/// In-memory append-mostly store of payment records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentLedger {
    records: Arc<RwLock<Vec<PaymentRecord>>>,
}

impl InMemoryPaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl PaymentLedger for InMemoryPaymentLedger {
    async fn insert(&self, record: PaymentRecord) -> Result<InsertOutcome, DomainError> {
        let mut records = self.records.write().await;

        if let Some(tx) = &record.transaction_id {
            if records
                .iter()
                .any(|r| r.transaction_id.as_deref() == Some(tx.as_str()))
            {
                return Ok(InsertOutcome::DuplicateTransaction);
            }
        }

        // A new approval supersedes any earlier approval for the same
        // account and period (a re-payment after a refund lands as a fresh
        // gateway transaction). The old record stays for audit but stops
        // counting as coverage; its transaction id keeps deduplicating.
        if record.status == PaymentStatus::Approved {
            for existing in records.iter_mut().filter(|r| {
                r.account_id == record.account_id
                    && r.period == record.period
                    && r.status == PaymentStatus::Approved
            }) {
                existing.status = PaymentStatus::Rejected;
            }
        }

        records.push(record);
        Ok(InsertOutcome::Inserted)
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.transaction_id.as_deref() == Some(transaction_id))
            .cloned())
    }

    async fn find_for_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<PaymentRecord>, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.account_id == *account_id)
            .cloned()
            .collect())
    }

    async fn list_for_period(
        &self,
        period: &BillingPeriod,
    ) -> Result<Vec<PaymentRecord>, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.period == *period)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<PaymentRecord>, DomainError> {
        Ok(self.records.read().await.clone())
    }
}
