//! CheckCredentialHandler - expiry health of the stored credential.
//!
//! Runs on the monitor's poll interval and on demand from the connection
//! screen. A stored token that still passes the local checks promotes a
//! Disconnected credential to Connected; a token found expired is
//! demoted to the error state so gateway calls stop immediately.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::credential::{
    classify, validate_token, ConnectionStatus, GatewayCredential, TokenError, TokenHealth,
};
use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::CredentialStore;

/// Snapshot of the credential's standing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CredentialReport {
    pub status: ConnectionStatus,
    /// Absent when no token is stored.
    pub health: Option<TokenHealth>,
    pub expires_at: Option<Timestamp>,
    pub last_error: Option<String>,
}

/// Handler classifying the stored credential against its expiry.
pub struct CheckCredentialHandler {
    store: Arc<dyn CredentialStore>,
}

impl CheckCredentialHandler {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<CredentialReport, DomainError> {
        let credential = self.store.load().await?;

        let Some(token) = credential.token.clone() else {
            return Ok(report_of(&credential, None));
        };

        match validate_token(&token) {
            Ok(claims) => {
                let health = classify(claims.expires_at, Timestamp::now());
                if health == TokenHealth::Expiring {
                    tracing::warn!(
                        expires_at = claims.expires_at.as_unix_secs(),
                        "gateway token is expiring soon"
                    );
                }
                let mut credential = credential;
                if credential.status == ConnectionStatus::Disconnected {
                    credential.mark_connected();
                    self.store.store(credential.clone()).await?;
                }
                Ok(report_of(&credential, Some(health)))
            }
            Err(err @ TokenError::Expired) => {
                tracing::warn!("gateway token has expired; disabling gateway calls");
                let demoted = GatewayCredential::with_error(err.to_string());
                self.store.store(demoted.clone()).await?;
                Ok(report_of(&demoted, Some(TokenHealth::Expired)))
            }
            Err(err) => {
                // A stored token failing structural checks means the store
                // was written outside this core; demote rather than trust.
                tracing::warn!(error = %err, "stored gateway token failed validation");
                let demoted = GatewayCredential::with_error(err.to_string());
                self.store.store(demoted.clone()).await?;
                Ok(report_of(&demoted, None))
            }
        }
    }
}

fn report_of(credential: &GatewayCredential, health: Option<TokenHealth>) -> CredentialReport {
    CredentialReport {
        status: credential.status,
        health,
        expires_at: credential.expires_at,
        last_error: credential.last_error.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use std::sync::Mutex;

    struct FakeStore {
        stored: Mutex<GatewayCredential>,
    }

    impl FakeStore {
        fn holding(credential: GatewayCredential) -> Arc<Self> {
            Arc::new(Self {
                stored: Mutex::new(credential),
            })
        }
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

    fn token_expiring_at(exp: i64) -> String {
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp));
        format!("header.{}.signature", payload)
    }

    fn stored_token(days_out: i64) -> GatewayCredential {
        let expires_at = Timestamp::now().add_days(days_out);
        GatewayCredential::with_token(token_expiring_at(expires_at.as_unix_secs()), expires_at)
    }

    #[tokio::test]
    async fn empty_store_reports_disconnected_without_health() {
        let store = FakeStore::holding(GatewayCredential::empty());
        let report = CheckCredentialHandler::new(store).handle().await.unwrap();

        assert_eq!(report.status, ConnectionStatus::Disconnected);
        assert_eq!(report.health, None);
    }

    #[tokio::test]
    async fn valid_token_promotes_disconnected_to_connected() {
        let store = FakeStore::holding(stored_token(30));
        let report = CheckCredentialHandler::new(store.clone())
            .handle()
            .await
            .unwrap();

        assert_eq!(report.status, ConnectionStatus::Connected);
        assert_eq!(report.health, Some(TokenHealth::Valid));
        assert_eq!(
            store.stored.lock().unwrap().status,
            ConnectionStatus::Connected
        );
    }

    #[tokio::test]
    async fn near_expiry_token_reports_expiring() {
        let store = FakeStore::holding(stored_token(3));
        let report = CheckCredentialHandler::new(store).handle().await.unwrap();

        assert_eq!(report.health, Some(TokenHealth::Expiring));
        assert_eq!(report.status, ConnectionStatus::Connected);
    }

    #[tokio::test]
    async fn expired_token_is_demoted_to_error_state() {
        let store = FakeStore::holding(stored_token(-1));
        let report = CheckCredentialHandler::new(store.clone())
            .handle()
            .await
            .unwrap();

        assert_eq!(report.status, ConnectionStatus::Error);
        assert_eq!(report.health, Some(TokenHealth::Expired));
        let stored = store.stored.lock().unwrap().clone();
        assert!(stored.token.is_none());
        assert!(!stored.usable());
    }

    #[tokio::test]
    async fn corrupt_stored_token_is_demoted() {
        let expires_at = Timestamp::now().add_days(30);
        let store = FakeStore::holding(GatewayCredential::with_token("garbage", expires_at));
        let report = CheckCredentialHandler::new(store).handle().await.unwrap();

        assert_eq!(report.status, ConnectionStatus::Error);
        assert!(report.last_error.is_some());
    }
}
