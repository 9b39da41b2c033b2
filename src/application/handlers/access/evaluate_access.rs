//! EvaluateAccessHandler - the access decision for one identity.
//!
//! Fail-closed by design: an ambiguous or unreachable account state never
//! grants access. The handler performs no writes and is safe to call
//! repeatedly and concurrently; a caller-side timeout collapses to
//! `Deny(Unavailable)`, never to `Allow`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::IdentityKey;
use crate::ports::AccountDirectory;

/// Query to evaluate access for an identity resolved from the caller's
/// session. Identity is always an explicit parameter; there is no
/// process-wide "current user".
#[derive(Debug, Clone)]
pub struct EvaluateAccessQuery {
    /// Raw contact key; empty/absent is itself a denial, not an error.
    pub identity: Option<String>,
}

/// Why access was denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DenyReason {
    /// No identity was presented.
    NoIdentity,
    /// No account carries this identity.
    NotFound,
    /// The account is in a blocking billing state.
    Billing { reason: Option<String> },
    /// The directory could not be consulted; denied fail-closed.
    Unavailable,
}

/// The access decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    Allow,
    Deny { reason: DenyReason },
}

impl AccessDecision {
    pub fn is_allow(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    fn deny(reason: DenyReason) -> Self {
        AccessDecision::Deny { reason }
    }
}

/// Handler evaluating whether an identity may proceed.
pub struct EvaluateAccessHandler {
    directory: Arc<dyn AccountDirectory>,
}

impl EvaluateAccessHandler {
    pub fn new(directory: Arc<dyn AccountDirectory>) -> Self {
        Self { directory }
    }

    /// Evaluates access. Total: every input maps to Allow or Deny; the
    /// directory error path is absorbed into `Deny(Unavailable)`.
    pub async fn handle(&self, query: EvaluateAccessQuery) -> AccessDecision {
        let identity = match query.identity.and_then(|raw| IdentityKey::new(raw).ok()) {
            Some(identity) => identity,
            None => return AccessDecision::deny(DenyReason::NoIdentity),
        };

        let account = match self.directory.find_by_identity(&identity).await {
            Ok(found) => found,
            Err(err) => {
                // Fail closed; the denial masks the true cause, so keep it
                // visible to operators.
                tracing::warn!(
                    identity = %identity,
                    error = %err,
                    "access denied: account directory unavailable"
                );
                return AccessDecision::deny(DenyReason::Unavailable);
            }
        };

        match account {
            None => AccessDecision::deny(DenyReason::NotFound),
            Some(account) if account.status.grants_access() => AccessDecision::Allow,
            Some(account) => AccessDecision::deny(DenyReason::Billing {
                reason: account.block_reason,
            }),
        }
    }
}
