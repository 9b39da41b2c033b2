//! In-memory credential store.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::credential::GatewayCredential;
use crate::domain::foundation::DomainError;
use crate::ports::CredentialStore;

/// Holds the single tenant credential in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    credential: Arc<RwLock<Option<GatewayCredential>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> Result<GatewayCredential, DomainError> {
        Ok(self
            .credential
            .read()
            .await
            .clone()
            .unwrap_or_else(GatewayCredential::empty))
    }

    async fn store(&self, credential: GatewayCredential) -> Result<(), DomainError> {
        *self.credential.write().await = Some(credential);
        Ok(())
    }
}
