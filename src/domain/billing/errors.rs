//! Error taxonomy for webhook reconciliation.

use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Failures of the webhook reconciliation path.
///
/// `SignatureMismatch` and `StaleSignature` guarantee zero state change;
/// `UnknownAccountReference` is rejected but reported for manual triage,
/// never silently dropped. Duplicate transactions are a success, not an
/// error, so they do not appear here.
#[derive(Debug, Clone, Error)]
pub enum ReconcileError {
    #[error("webhook signature mismatch")]
    SignatureMismatch,

    #[error("signature timestamp outside the acceptance window")]
    StaleSignature,

    #[error("malformed webhook payload: {0}")]
    MalformedPayload(String),

    #[error("unknown account reference '{reference}'")]
    UnknownAccountReference { reference: String },

    #[error("invalid account state: {0}")]
    InvalidState(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl From<DomainError> for ReconcileError {
    fn from(err: DomainError) -> Self {
        ReconcileError::Infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn domain_error_converts_to_infrastructure() {
        let err: ReconcileError =
            DomainError::new(ErrorCode::LedgerError, "ledger write failed").into();
        assert!(matches!(err, ReconcileError::Infrastructure(_)));
    }

    #[test]
    fn unknown_account_reference_names_the_reference() {
        let err = ReconcileError::UnknownAccountReference {
            reference: "ghost@example.com".to_string(),
        };
        assert!(err.to_string().contains("ghost@example.com"));
    }
}
