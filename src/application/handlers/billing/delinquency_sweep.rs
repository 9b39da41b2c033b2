//! DelinquencySweepHandler - periodic triage report of unpaid accounts.
//!
//! The sweep is set-based: one pass over the period's ledger records
//! builds the covered set, one pass over the directory subtracts it.
//! Cost stays linear in accounts plus records, never accounts times
//! records.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;

use crate::domain::billing::{PaymentRecord, PaymentStatus};
use crate::domain::foundation::{AccountId, BillingPeriod, DomainError};
use crate::ports::{AccountDirectory, PaymentLedger};

/// Query for one sweep; `period` defaults to the current billing period.
#[derive(Debug, Clone)]
pub struct DelinquencySweepQuery {
    pub period: Option<BillingPeriod>,
}

/// One unpaid account with its triage annotations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelinquentAccount {
    pub account_id: AccountId,
    pub identity: String,
    pub name: String,
    /// Most recent period covered by an approved payment, if any ever was.
    pub last_paid_period: Option<BillingPeriod>,
    /// Lifetime sum of approved payments, smallest currency unit.
    pub lifetime_paid_cents: i64,
    /// Number of periods ever covered by an approved payment.
    pub paid_period_count: usize,
}

/// Sweep result for one billing period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelinquencyReport {
    pub period: BillingPeriod,
    pub delinquent: Vec<DelinquentAccount>,
}

/// Handler computing which ordinary accounts lack coverage for a period.
pub struct DelinquencySweepHandler {
    directory: Arc<dyn AccountDirectory>,
    ledger: Arc<dyn PaymentLedger>,
}

impl DelinquencySweepHandler {
    pub fn new(directory: Arc<dyn AccountDirectory>, ledger: Arc<dyn PaymentLedger>) -> Self {
        Self { directory, ledger }
    }

    /// Runs the sweep. Administrative accounts are exempt; an approved or
    /// pending-verification record covers its period.
    pub async fn handle(
        &self,
        query: DelinquencySweepQuery,
    ) -> Result<DelinquencyReport, DomainError> {
        let period = query.period.unwrap_or_else(BillingPeriod::current);

        let covered: HashSet<AccountId> = self
            .ledger
            .list_for_period(&period)
            .await?
            .iter()
            .filter(|r| r.status.covers_period())
            .map(|r| r.account_id)
            .collect();

        let accounts = self.directory.list_all().await?;
        let history = group_by_account(self.ledger.list_all().await?);

        let delinquent: Vec<DelinquentAccount> = accounts
            .into_iter()
            .filter(|a| !a.role.is_administrative())
            .filter(|a| !covered.contains(&a.id))
            .map(|a| {
                let records = history.get(&a.id).map(Vec::as_slice).unwrap_or(&[]);
                annotate(a.id, a.identity.as_str(), &a.name, records)
            })
            .collect();

        tracing::info!(
            period = %period,
            delinquent_count = delinquent.len(),
            "delinquency sweep complete"
        );

        Ok(DelinquencyReport { period, delinquent })
    }
}

fn group_by_account(records: Vec<PaymentRecord>) -> HashMap<AccountId, Vec<PaymentRecord>> {
    let mut by_account: HashMap<AccountId, Vec<PaymentRecord>> = HashMap::new();
    for record in records {
        by_account.entry(record.account_id).or_default().push(record);
    }
    by_account
}

fn annotate(
    account_id: AccountId,
    identity: &str,
    name: &str,
    records: &[PaymentRecord],
) -> DelinquentAccount {
    let approved: Vec<&PaymentRecord> = records
        .iter()
        .filter(|r| r.status == PaymentStatus::Approved)
        .collect();

    let paid_periods: HashSet<BillingPeriod> = approved.iter().map(|r| r.period).collect();

    DelinquentAccount {
        account_id,
        identity: identity.to_string(),
        name: name.to_string(),
        last_paid_period: paid_periods.iter().max().copied(),
        lifetime_paid_cents: approved.iter().map(|r| r.amount_cents).sum(),
        paid_period_count: paid_periods.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{Account, AccountRole, AccountStatus};
    use crate::domain::foundation::IdentityKey;
    use async_trait::async_trait;

    struct FakeDirectory {
        accounts: Vec<Account>,
    }

    #[async_trait]
    impl AccountDirectory for FakeDirectory {
        async fn find_by_identity(
            &self,
            identity: &IdentityKey,
        ) -> Result<Option<Account>, DomainError> {
            Ok(self.accounts.iter().find(|a| a.identity == *identity).cloned())
        }

        async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
            Ok(self.accounts.iter().find(|a| a.id == *id).cloned())
        }

        async fn list_all(&self) -> Result<Vec<Account>, DomainError> {
            Ok(self.accounts.clone())
        }

        async fn update_status(
            &self,
            _id: &AccountId,
            _status: AccountStatus,
            _block_reason: Option<String>,
        ) -> Result<(), DomainError> {
            Ok(())
        }
    }

    struct FakeLedger {
        records: Vec<PaymentRecord>,
    }

    #[async_trait]
    impl PaymentLedger for FakeLedger {
        async fn insert(
            &self,
            _record: PaymentRecord,
        ) -> Result<crate::ports::InsertOutcome, DomainError> {
            unimplemented!("sweep never inserts")
        }

        async fn find_by_transaction_id(
            &self,
            _transaction_id: &str,
        ) -> Result<Option<PaymentRecord>, DomainError> {
            Ok(None)
        }

        async fn find_for_account(
            &self,
            account_id: &AccountId,
        ) -> Result<Vec<PaymentRecord>, DomainError> {
            Ok(self
                .records
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
                .iter()
                .filter(|r| r.period == *period)
                .cloned()
                .collect())
        }

        async fn list_all(&self) -> Result<Vec<PaymentRecord>, DomainError> {
            Ok(self.records.clone())
        }
    }

    fn account(name: &str, identity: &str, role: AccountRole) -> Account {
        Account::new(
            AccountId::new(),
            IdentityKey::new(identity).unwrap(),
            name,
            role,
            AccountStatus::Active,
        )
    }

    fn period(month: u32) -> BillingPeriod {
        BillingPeriod::new(2026, month).unwrap()
    }

    fn handler(accounts: Vec<Account>, records: Vec<PaymentRecord>) -> DelinquencySweepHandler {
        DelinquencySweepHandler::new(
            Arc::new(FakeDirectory { accounts }),
            Arc::new(FakeLedger { records }),
        )
    }

    #[tokio::test]
    async fn unpaid_ordinary_accounts_are_reported() {
        let paid = account("Paid", "paid@example.com", AccountRole::Ordinary);
        let unpaid = account("Unpaid", "unpaid@example.com", AccountRole::Ordinary);
        let records = vec![PaymentRecord::gateway_approved(
            paid.id,
            period(8),
            4990,
            "T1",
        )];

        let report = handler(vec![paid, unpaid.clone()], records)
            .handle(DelinquencySweepQuery {
                period: Some(period(8)),
            })
            .await
            .unwrap();

        assert_eq!(report.delinquent.len(), 1);
        assert_eq!(report.delinquent[0].account_id, unpaid.id);
        assert_eq!(report.delinquent[0].identity, "unpaid@example.com");
    }

    #[tokio::test]
    async fn administrative_accounts_are_exempt() {
        let admin = account("Admin", "admin@example.com", AccountRole::Administrative);

        let report = handler(vec![admin], vec![])
            .handle(DelinquencySweepQuery {
                period: Some(period(8)),
            })
            .await
            .unwrap();

        assert!(report.delinquent.is_empty());
    }

    #[tokio::test]
    async fn pending_verification_counts_as_coverage() {
        let acc = account("Pending", "pending@example.com", AccountRole::Ordinary);
        let records = vec![PaymentRecord::manual_submission(
            acc.id,
            period(8),
            "https://storage.example/proof.pdf",
        )];

        let report = handler(vec![acc], records)
            .handle(DelinquencySweepQuery {
                period: Some(period(8)),
            })
            .await
            .unwrap();

        assert!(report.delinquent.is_empty());
    }

    #[tokio::test]
    async fn rejected_records_do_not_cover() {
        let acc = account("Voided", "voided@example.com", AccountRole::Ordinary);
        let records = vec![PaymentRecord::gateway_voided(
            acc.id,
            period(8),
            4990,
            "T1",
            crate::domain::billing::GatewayEventKind::Refunded,
        )];

        let report = handler(vec![acc.clone()], records)
            .handle(DelinquencySweepQuery {
                period: Some(period(8)),
            })
            .await
            .unwrap();

        assert_eq!(report.delinquent.len(), 1);
        assert_eq!(report.delinquent[0].account_id, acc.id);
    }

    #[tokio::test]
    async fn annotations_summarize_approved_history() {
        let acc = account("History", "history@example.com", AccountRole::Ordinary);
        let records = vec![
            PaymentRecord::gateway_approved(acc.id, period(5), 4990, "T1"),
            PaymentRecord::gateway_approved(acc.id, period(6), 4990, "T2"),
            PaymentRecord::gateway_voided(
                acc.id,
                period(7),
                4990,
                "T3",
                crate::domain::billing::GatewayEventKind::Canceled,
            ),
        ];

        let report = handler(vec![acc], records)
            .handle(DelinquencySweepQuery {
                period: Some(period(8)),
            })
            .await
            .unwrap();

        assert_eq!(report.delinquent.len(), 1);
        let entry = &report.delinquent[0];
        assert_eq!(entry.last_paid_period, Some(period(6)));
        assert_eq!(entry.lifetime_paid_cents, 9980);
        assert_eq!(entry.paid_period_count, 2);
    }

    #[tokio::test]
    async fn never_paid_account_has_empty_annotations() {
        let acc = account("Fresh", "fresh@example.com", AccountRole::Ordinary);

        let report = handler(vec![acc], vec![])
            .handle(DelinquencySweepQuery {
                period: Some(period(8)),
            })
            .await
            .unwrap();

        let entry = &report.delinquent[0];
        assert_eq!(entry.last_paid_period, None);
        assert_eq!(entry.lifetime_paid_cents, 0);
        assert_eq!(entry.paid_period_count, 0);
    }
}
