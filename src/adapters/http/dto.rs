//! HTTP DTOs for the gatekeeping and reconciliation API.
//!
//! These types define the JSON request/response structure and are the
//! boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::application::handlers::billing::ReconcileOutcome;
use crate::domain::account::AccountStatus;
use crate::domain::foundation::{AccountId, BillingPeriod};
use crate::domain::support::Sender;

// ── Request DTOs ───────────────────────────────────────────────────────

/// Request to store a new gateway API token.
#[derive(Debug, Clone, Deserialize)]
pub struct PersistTokenRequest {
    pub token: String,
}

/// Request to open (or reuse) the billing-urgent thread for an account.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenThreadRequest {
    pub account_id: AccountId,
}

/// Request to post a message to a thread.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageRequest {
    pub sender: Sender,
    pub sender_id: String,
    pub body: String,
}

/// Request to submit a proof-of-payment file.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitProofRequest {
    pub account_id: AccountId,
    /// Defaults to the current billing period.
    #[serde(default)]
    pub period: Option<BillingPeriod>,
    pub file_name: String,
    /// File contents, base64-encoded.
    pub contents: String,
}

// ── Response DTOs ──────────────────────────────────────────────────────

/// Standard error shape for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Acknowledgement of a processed webhook delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAckResponse {
    pub outcome: String,
    pub transaction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_status: Option<AccountStatus>,
}

impl From<ReconcileOutcome> for WebhookAckResponse {
    fn from(outcome: ReconcileOutcome) -> Self {
        match outcome {
            ReconcileOutcome::Reconciled {
                transaction_id,
                new_status,
                ..
            } => Self {
                outcome: "reconciled".to_string(),
                transaction_id,
                new_status,
            },
            ReconcileOutcome::Duplicate { transaction_id } => Self {
                outcome: "duplicate".to_string(),
                transaction_id,
                new_status: None,
            },
        }
    }
}

/// Response for a submitted payment proof.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofSubmittedResponse {
    pub record_id: String,
    pub proof_reference: String,
}
