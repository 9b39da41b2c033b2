//! SubmitProofHandler - manual proof-of-payment upload.
//!
//! Upload first, ledger second: the record only exists once the file is
//! durably stored, so a failed upload leaves nothing behind and the
//! submitter sees the failure instead of a phantom pending payment.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::billing::PaymentRecord;
use crate::domain::foundation::{AccountId, BillingPeriod, DomainError, PaymentRecordId};
use crate::ports::{AccountDirectory, PaymentLedger, ProofStorage, UploadFailure};

#[derive(Debug, Clone)]
pub struct SubmitProofCommand {
    pub account_id: AccountId,
    /// Period the proof claims to cover; defaults to the current period.
    pub period: Option<BillingPeriod>,
    pub file_name: String,
    pub contents: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum SubmitProofError {
    #[error("account not found")]
    AccountNotFound,

    #[error(transparent)]
    Upload(#[from] UploadFailure),

    #[error(transparent)]
    Infrastructure(#[from] DomainError),
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofSubmitted {
    pub record_id: PaymentRecordId,
    pub proof_reference: String,
}

/// Handler storing an uploaded proof and journaling the provisional
/// pending-verification record.
pub struct SubmitProofHandler {
    directory: Arc<dyn AccountDirectory>,
    ledger: Arc<dyn PaymentLedger>,
    storage: Arc<dyn ProofStorage>,
}

impl SubmitProofHandler {
    pub fn new(
        directory: Arc<dyn AccountDirectory>,
        ledger: Arc<dyn PaymentLedger>,
        storage: Arc<dyn ProofStorage>,
    ) -> Self {
        Self {
            directory,
            ledger,
            storage,
        }
    }

    pub async fn handle(
        &self,
        command: SubmitProofCommand,
    ) -> Result<ProofSubmitted, SubmitProofError> {
        if self
            .directory
            .find_by_id(&command.account_id)
            .await?
            .is_none()
        {
            return Err(SubmitProofError::AccountNotFound);
        }

        let proof_reference = self
            .storage
            .upload(&command.file_name, &command.contents)
            .await
            .map_err(|err| {
                tracing::warn!(
                    account_id = %command.account_id,
                    file_name = %command.file_name,
                    error = %err,
                    "proof upload failed; no record created"
                );
                err
            })?;

        let period = command.period.unwrap_or_else(BillingPeriod::current);
        let record =
            PaymentRecord::manual_submission(command.account_id, period, proof_reference.clone());
        let record_id = record.id;
        self.ledger.insert(record).await?;

        tracing::info!(
            account_id = %command.account_id,
            record_id = %record_id,
            period = %period,
            "proof of payment submitted for verification"
        );

        Ok(ProofSubmitted {
            record_id,
            proof_reference,
        })
    }
}
