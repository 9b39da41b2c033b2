//! Account aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, IdentityKey, Timestamp, ValidationError};

use super::{AccountRole, AccountStatus};
use crate::domain::foundation::StateMachine;

/// The billable identity guarding access.
///
/// Created externally on signup. Never deleted by this core; status is
/// mutated only via [`Account::apply_status`], which validates the
/// transition. A status is required at construction, so the "account with
/// no status" ambiguity of loosely-typed stores cannot arise here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    /// Contact key used as the access-check identity (e.g. email).
    pub identity: IdentityKey,
    pub name: String,
    pub role: AccountRole,
    pub status: AccountStatus,
    /// User-visible reason when the account is in a blocking state.
    pub block_reason: Option<String>,
    pub created_at: Timestamp,
}

impl Account {
    /// Creates an account in the given initial standing.
    pub fn new(
        id: AccountId,
        identity: IdentityKey,
        name: impl Into<String>,
        role: AccountRole,
        status: AccountStatus,
    ) -> Self {
        Self {
            id,
            identity,
            name: name.into(),
            role,
            status,
            block_reason: None,
            created_at: Timestamp::now(),
        }
    }

    /// Applies a new status, validating the transition.
    ///
    /// Moving into `Active` clears any stored block reason; moving into a
    /// blocking state records the given reason.
    pub fn apply_status(
        &mut self,
        target: AccountStatus,
        reason: Option<String>,
    ) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(target)?;
        if self.status.grants_access() {
            self.block_reason = None;
        } else {
            self.block_reason = reason;
        }
        Ok(())
    }
}
