//! Account directory port.
//!
//! The underlying account store is an external collaborator; this port is
//! its lookup-by-key / query-by-filter boundary. Accounts are created on
//! signup outside this core and never deleted by it.

use async_trait::async_trait;

use crate::domain::account::{Account, AccountStatus};
use crate::domain::foundation::{AccountId, DomainError, IdentityKey};

/// Read/update boundary over the external account store.
///
/// Any failure returned from this port is treated fail-closed by the
/// Access Gate: an ambiguous or unreachable directory never grants
/// access.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Resolves an account by its contact key.
    ///
    /// Returns `None` when no account carries that identity.
    async fn find_by_identity(
        &self,
        identity: &IdentityKey,
    ) -> Result<Option<Account>, DomainError>;

    /// Resolves an account by id.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;

    /// Lists every account in the tenant.
    ///
    /// The delinquency sweep consumes this as a snapshot; slight staleness
    /// relative to the ledger is acceptable.
    async fn list_all(&self) -> Result<Vec<Account>, DomainError>;

    /// Writes a status (and optional block reason) for an account.
    ///
    /// Implementations must persist atomically per account; callers have
    /// already validated the transition.
    async fn update_status(
        &self,
        id: &AccountId,
        status: AccountStatus,
        block_reason: Option<String>,
    ) -> Result<(), DomainError>;
}
