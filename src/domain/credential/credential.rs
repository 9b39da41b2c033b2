//! Stored gateway credential and its connection status.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, Timestamp};

/// Connection standing of the stored gateway credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    /// Credential validated against the gateway.
    Connected,
    /// No credential, or not yet revalidated.
    Disconnected,
    /// Last validation failed; gateway calls disabled until a new token
    /// is persisted.
    Error,
}

impl StateMachine for ConnectionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        // Every transition is legal: persist resets to Disconnected,
        // validation flips to Connected or Error, revoke returns to
        // Disconnected from anywhere.
        let _ = target;
        true
    }

    fn valid_transitions(&self) -> Vec<Self> {
        vec![
            ConnectionStatus::Connected,
            ConnectionStatus::Disconnected,
            ConnectionStatus::Error,
        ]
    }
}

/// The tenant's gateway API credential, one record per tenant.
///
/// The expiry is always derived from the token's embedded claim, never
/// set independently, so the stored credential and its real expiry
/// cannot drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayCredential {
    pub token: Option<String>,
    pub expires_at: Option<Timestamp>,
    pub status: ConnectionStatus,
    pub last_error: Option<String>,
    pub updated_at: Timestamp,
}

impl GatewayCredential {
    /// The empty credential: disconnected, nothing stored.
    pub fn empty() -> Self {
        Self {
            token: None,
            expires_at: None,
            status: ConnectionStatus::Disconnected,
            last_error: None,
            updated_at: Timestamp::now(),
        }
    }

    /// Stores a validated token with its derived expiry.
    ///
    /// Status resets to Disconnected until the next successful
    /// validation marks it Connected.
    pub fn with_token(token: impl Into<String>, expires_at: Timestamp) -> Self {
        Self {
            token: Some(token.into()),
            expires_at: Some(expires_at),
            status: ConnectionStatus::Disconnected,
            last_error: None,
            updated_at: Timestamp::now(),
        }
    }

    /// Records a validation failure verbatim and disables gateway calls.
    pub fn with_error(error: impl Into<String>) -> Self {
        Self {
            token: None,
            expires_at: None,
            status: ConnectionStatus::Error,
            last_error: Some(error.into()),
            updated_at: Timestamp::now(),
        }
    }

    /// Marks the credential as validated against the gateway.
    pub fn mark_connected(&mut self) {
        self.status = ConnectionStatus::Connected;
        self.last_error = None;
        self.updated_at = Timestamp::now();
    }

    /// True when a token is present and the status permits gateway calls.
    pub fn usable(&self) -> bool {
        self.token.is_some() && self.status != ConnectionStatus::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_credential_is_disconnected_and_unusable() {
        let cred = GatewayCredential::empty();
        assert_eq!(cred.status, ConnectionStatus::Disconnected);
        assert!(!cred.usable());
    }

    #[test]
    fn with_token_resets_to_disconnected() {
        let cred = GatewayCredential::with_token("tok", Timestamp::now().add_days(30));
        assert_eq!(cred.status, ConnectionStatus::Disconnected);
        assert!(cred.usable());
        assert!(cred.last_error.is_none());
    }

    #[test]
    fn with_error_stores_message_verbatim_and_disables() {
        let cred = GatewayCredential::with_error("token is already expired");
        assert_eq!(cred.status, ConnectionStatus::Error);
        assert_eq!(cred.last_error.as_deref(), Some("token is already expired"));
        assert!(!cred.usable());
    }

    #[test]
    fn mark_connected_clears_last_error() {
        let mut cred = GatewayCredential::with_token("tok", Timestamp::now().add_days(30));
        cred.last_error = Some("stale".to_string());
        cred.mark_connected();
        assert_eq!(cred.status, ConnectionStatus::Connected);
        assert!(cred.last_error.is_none());
    }
}
