//! Account role.

use serde::{Deserialize, Serialize};

/// Role of an account within the tenant.
///
/// Administrative accounts are excluded from delinquency evaluation and
/// from billing-driven denial semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Ordinary,
    Administrative,
}

impl AccountRole {
    /// Returns true for administrative accounts.
    pub fn is_administrative(&self) -> bool {
        matches!(self, AccountRole::Administrative)
    }
}
