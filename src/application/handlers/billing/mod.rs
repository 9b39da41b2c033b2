//! Payment reconciliation and delinquency handlers.

mod delinquency_sweep;
mod reconcile_webhook;
mod submit_proof;

pub use delinquency_sweep::{
    DelinquencyReport, DelinquencySweepHandler, DelinquencySweepQuery, DelinquentAccount,
};
pub use reconcile_webhook::{ReconcileOutcome, ReconcileWebhookCommand, ReconcileWebhookHandler};
pub use submit_proof::{ProofSubmitted, SubmitProofCommand, SubmitProofError, SubmitProofHandler};
