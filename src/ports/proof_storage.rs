//! Proof-of-payment file storage port.

use async_trait::async_trait;
use thiserror::Error;

/// Upload failure; surfaced to the submitter, never swallowed.
#[derive(Debug, Clone, Error)]
#[error("proof upload failed: {reason}")]
pub struct UploadFailure {
    pub reason: String,
}

impl UploadFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// External file store for uploaded payment proofs.
///
/// The core never reads the file back; it only keeps the durable
/// reference URL on the payment record.
#[async_trait]
pub trait ProofStorage: Send + Sync {
    /// Stores the file contents and returns a durable reference URL.
    async fn upload(&self, file_name: &str, contents: &[u8]) -> Result<String, UploadFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proof_storage_is_object_safe() {
        fn _accepts_dyn(_storage: &dyn ProofStorage) {}
    }
}
