//! PersistTokenHandler - store a new gateway API token.
//!
//! Validation happens before anything is written. A token that fails the
//! local checks is never stored; instead the failure is recorded verbatim
//! on the credential so the connection screen can show exactly why the
//! gateway is disabled.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::credential::{validate_token, GatewayCredential, TokenError};
use crate::domain::foundation::DomainError;
use crate::ports::CredentialStore;

#[derive(Debug, Clone)]
pub struct PersistTokenCommand {
    pub token: String,
}

#[derive(Debug, Error)]
pub enum PersistTokenError {
    #[error(transparent)]
    Invalid(#[from] TokenError),

    #[error(transparent)]
    Infrastructure(#[from] DomainError),
}

/// Handler validating and storing the tenant's gateway token.
pub struct PersistTokenHandler {
    store: Arc<dyn CredentialStore>,
}

impl PersistTokenHandler {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Validates the token locally and persists it with its derived
    /// expiry. On validation failure the error state is persisted and the
    /// error returned to the caller.
    pub async fn handle(
        &self,
        command: PersistTokenCommand,
    ) -> Result<GatewayCredential, PersistTokenError> {
        match validate_token(&command.token) {
            Ok(claims) => {
                let credential = GatewayCredential::with_token(command.token, claims.expires_at);
                self.store.store(credential.clone()).await?;
                tracing::info!(
                    expires_at = claims.expires_at.as_unix_secs(),
                    "gateway token persisted"
                );
                Ok(credential)
            }
            Err(err) => {
                tracing::warn!(error = %err, "gateway token rejected");
                self.store
                    .store(GatewayCredential::with_error(err.to_string()))
                    .await?;
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::credential::ConnectionStatus;
    use crate::domain::foundation::Timestamp;
    use async_trait::async_trait;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeStore {
        stored: Mutex<Option<GatewayCredential>>,
    }

    #[async_trait]
    impl CredentialStore for FakeStore {
        async fn load(&self) -> Result<GatewayCredential, DomainError> {
            Ok(self
                .stored
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(GatewayCredential::empty))
        }

        async fn store(&self, credential: GatewayCredential) -> Result<(), DomainError> {
            *self.stored.lock().unwrap() = Some(credential);
            Ok(())
        }
    }

    fn token_expiring_at(exp: i64) -> String {
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp));
        format!("header.{}.signature", payload)
    }

    #[tokio::test]
    async fn valid_token_is_stored_with_derived_expiry() {
        let store = Arc::new(FakeStore::default());
        let handler = PersistTokenHandler::new(store.clone());
        let exp = Timestamp::now().add_days(30).as_unix_secs();

        let credential = handler
            .handle(PersistTokenCommand {
                token: token_expiring_at(exp),
            })
            .await
            .unwrap();

        assert_eq!(credential.status, ConnectionStatus::Disconnected);
        assert_eq!(
            credential.expires_at.map(|t| t.as_unix_secs()),
            Some(exp)
        );
        let stored = store.stored.lock().unwrap().clone().unwrap();
        assert_eq!(stored, credential);
    }

    #[tokio::test]
    async fn malformed_token_stores_error_state() {
        let store = Arc::new(FakeStore::default());
        let handler = PersistTokenHandler::new(store.clone());

        let result = handler
            .handle(PersistTokenCommand {
                token: "not-a-token".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(PersistTokenError::Invalid(TokenError::InvalidFormat))
        ));
        let stored = store.stored.lock().unwrap().clone().unwrap();
        assert_eq!(stored.status, ConnectionStatus::Error);
        assert!(stored.token.is_none());
        assert!(stored.last_error.is_some());
    }

    #[tokio::test]
    async fn expired_token_is_rejected_before_storage() {
        let store = Arc::new(FakeStore::default());
        let handler = PersistTokenHandler::new(store.clone());
        let exp = Timestamp::now().minus_days(1).as_unix_secs();

        let result = handler
            .handle(PersistTokenCommand {
                token: token_expiring_at(exp),
            })
            .await;

        assert!(matches!(
            result,
            Err(PersistTokenError::Invalid(TokenError::Expired))
        ));
        let stored = store.stored.lock().unwrap().clone().unwrap();
        assert_eq!(
            stored.last_error.as_deref(),
            Some("token is already expired")
        );
    }
}
