//! Credential store port: one gateway credential record per tenant.

use async_trait::async_trait;

use crate::domain::credential::GatewayCredential;
use crate::domain::foundation::DomainError;

/// Holds the gateway API credential and its derived lifecycle state.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads the stored credential; the empty credential if none was
    /// ever persisted.
    async fn load(&self) -> Result<GatewayCredential, DomainError>;

    /// Replaces the stored credential.
    async fn store(&self, credential: GatewayCredential) -> Result<(), DomainError>;
}
