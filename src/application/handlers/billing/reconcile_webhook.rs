//! ReconcileWebhookHandler - verified gateway events into the ledger.
//!
//! Order of operations is fixed: verify signature, deduplicate on
//! transaction id, resolve the account, journal the ledger record, then
//! recompute the account status from the ledger. The ledger write lands
//! before the status write, so a crash in between is healed by the next
//! derivation pass rather than leaving a payment unaccounted for.

use std::sync::Arc;

use crate::domain::account::{Account, AccountStatus};
use crate::domain::billing::{
    block_reason_for, derived_status, GatewayEvent, GatewayEventKind, GatewayWebhookVerifier,
    PaymentRecord, ReconcileError,
};
use crate::domain::foundation::{AccountId, IdentityKey};
use crate::ports::{AccountDirectory, InsertOutcome, PaymentLedger};

/// A raw webhook delivery: body bytes plus the signature header value.
#[derive(Debug, Clone)]
pub struct ReconcileWebhookCommand {
    pub payload: Vec<u8>,
    pub signature_header: String,
}

/// What reconciliation did with the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The event was journaled and the account status re-derived.
    Reconciled {
        account_id: AccountId,
        transaction_id: String,
        new_status: Option<AccountStatus>,
    },
    /// A record with this transaction id already exists; the delivery is
    /// acknowledged without any write.
    Duplicate { transaction_id: String },
}

/// Handler turning signed gateway webhooks into ledger records and
/// derived account status.
pub struct ReconcileWebhookHandler {
    verifier: GatewayWebhookVerifier,
    directory: Arc<dyn AccountDirectory>,
    ledger: Arc<dyn PaymentLedger>,
}

impl ReconcileWebhookHandler {
    pub fn new(
        webhook_secret: impl Into<String>,
        directory: Arc<dyn AccountDirectory>,
        ledger: Arc<dyn PaymentLedger>,
    ) -> Self {
        Self {
            verifier: GatewayWebhookVerifier::new(webhook_secret),
            directory,
            ledger,
        }
    }

    pub async fn handle(
        &self,
        command: ReconcileWebhookCommand,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let event = match self
            .verifier
            .verify_and_parse(&command.payload, &command.signature_header)
        {
            Ok(event) => event,
            Err(err @ ReconcileError::SignatureMismatch) => {
                // Potential tampering; surface loudly, change nothing.
                tracing::warn!("webhook rejected: signature mismatch");
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        // A replay is acknowledged before the account is even looked up,
        // so the answer stays "duplicate" even when the account reference
        // has since become unresolvable.
        if self
            .ledger
            .find_by_transaction_id(&event.transaction_id)
            .await?
            .is_some()
        {
            tracing::info!(
                transaction_id = %event.transaction_id,
                "webhook replay acknowledged without write"
            );
            return Ok(ReconcileOutcome::Duplicate {
                transaction_id: event.transaction_id,
            });
        }

        let account = self.resolve_account(&event).await?;

        let record = journal_record(account.id, &event);
        // Insert dedupes again; a concurrent delivery can land between
        // the check above and this write.
        let outcome = self.ledger.insert(record).await?;
        if outcome == InsertOutcome::DuplicateTransaction {
            return Ok(ReconcileOutcome::Duplicate {
                transaction_id: event.transaction_id,
            });
        }

        let new_status = self.rederive_status(&account).await?;

        tracing::info!(
            account_id = %account.id,
            transaction_id = %event.transaction_id,
            event_kind = ?event.kind,
            new_status = ?new_status,
            "gateway event reconciled"
        );

        Ok(ReconcileOutcome::Reconciled {
            account_id: account.id,
            transaction_id: event.transaction_id,
            new_status,
        })
    }

    async fn resolve_account(&self, event: &GatewayEvent) -> Result<Account, ReconcileError> {
        let identity = IdentityKey::new(event.account_reference.clone()).map_err(|_| {
            ReconcileError::MalformedPayload("empty account reference".to_string())
        })?;

        match self.directory.find_by_identity(&identity).await? {
            Some(account) => Ok(account),
            None => {
                // Rejected but reported; a paid-for event with no matching
                // account needs manual triage, not a silent drop.
                tracing::warn!(
                    account_reference = %event.account_reference,
                    transaction_id = %event.transaction_id,
                    "webhook rejected: no account matches reference"
                );
                Err(ReconcileError::UnknownAccountReference {
                    reference: event.account_reference.clone(),
                })
            }
        }
    }

    /// Recomputes the account status from the full ledger slice and
    /// persists it when the derivation yields one.
    ///
    /// The write goes through [`Account::apply_status`], so the aggregate's
    /// transition rules and block-reason bookkeeping hold for derived
    /// statuses too.
    async fn rederive_status(
        &self,
        account: &Account,
    ) -> Result<Option<AccountStatus>, ReconcileError> {
        let records = self.ledger.find_for_account(&account.id).await?;
        let Some(status) = derived_status(&records) else {
            return Ok(None);
        };

        let mut account = account.clone();
        account
            .apply_status(status, block_reason_for(status))
            .map_err(|err| ReconcileError::InvalidState(err.to_string()))?;
        self.directory
            .update_status(&account.id, account.status, account.block_reason.clone())
            .await?;
        Ok(Some(status))
    }
}

fn journal_record(account_id: AccountId, event: &GatewayEvent) -> PaymentRecord {
    match event.kind {
        GatewayEventKind::Approved => PaymentRecord::gateway_approved(
            account_id,
            event.period,
            event.amount_cents,
            event.transaction_id.clone(),
        ),
        kind @ (GatewayEventKind::Canceled | GatewayEventKind::Refunded) => {
            PaymentRecord::gateway_voided(
                account_id,
                event.period,
                event.amount_cents,
                event.transaction_id.clone(),
                kind,
            )
        }
    }
}
