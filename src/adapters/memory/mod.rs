//! In-memory adapters for every port.
//!
//! Back the development server and the integration tests; a production
//! deployment swaps these for database-backed implementations behind the
//! same traits.

mod account_directory;
mod credential_store;
mod payment_ledger;
mod proof_storage;
mod support_threads;

pub use account_directory::InMemoryAccountDirectory;
pub use credential_store::InMemoryCredentialStore;
pub use payment_ledger::InMemoryPaymentLedger;
pub use proof_storage::InMemoryProofStorage;
pub use support_threads::InMemorySupportThreads;
