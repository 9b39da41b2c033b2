//! Ports: async trait boundaries between the application core and its
//! external collaborators.

mod account_directory;
mod credential_store;
mod payment_ledger;
mod proof_storage;
mod support_threads;

pub use account_directory::AccountDirectory;
pub use credential_store::CredentialStore;
pub use payment_ledger::{InsertOutcome, PaymentLedger};
pub use proof_storage::{ProofStorage, UploadFailure};
pub use support_threads::SupportThreadRepository;
