//! RevokeTokenHandler - clear the stored gateway credential.

use std::sync::Arc;

use crate::domain::credential::GatewayCredential;
use crate::domain::foundation::DomainError;
use crate::ports::CredentialStore;

/// Handler replacing the stored credential with the empty, disconnected
/// one. Revoking an already-empty store is a no-op success.
pub struct RevokeTokenHandler {
    store: Arc<dyn CredentialStore>,
}

impl RevokeTokenHandler {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<(), DomainError> {
        self.store.store(GatewayCredential::empty()).await?;
        tracing::info!("gateway credential revoked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::credential::ConnectionStatus;
    use crate::domain::foundation::Timestamp;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeStore {
        stored: Mutex<GatewayCredential>,
    }

    #[async_trait]
    impl CredentialStore for FakeStore {
        async fn load(&self) -> Result<GatewayCredential, DomainError> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn store(&self, credential: GatewayCredential) -> Result<(), DomainError> {
            *self.stored.lock().unwrap() = credential;
            Ok(())
        }
    }

    #[tokio::test]
    async fn revoke_clears_token_and_disconnects() {
        let store = Arc::new(FakeStore {
            stored: Mutex::new(GatewayCredential::with_token(
                "tok",
                Timestamp::now().add_days(30),
            )),
        });

        RevokeTokenHandler::new(store.clone()).handle().await.unwrap();

        let stored = store.stored.lock().unwrap().clone();
        assert!(stored.token.is_none());
        assert_eq!(stored.status, ConnectionStatus::Disconnected);
    }

    #[tokio::test]
    async fn revoking_empty_store_succeeds() {
        let store = Arc::new(FakeStore {
            stored: Mutex::new(GatewayCredential::empty()),
        });

        assert!(RevokeTokenHandler::new(store).handle().await.is_ok());
    }
}
