//! In-memory account directory.
//!
//! Backs tests and single-node development deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{Account, AccountStatus};
use crate::domain::foundation::{AccountId, DomainError, ErrorCode, IdentityKey};
use crate::ports::AccountDirectory;

/// In-memory directory of accounts keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountDirectory {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an account, replacing any existing record with the same id.
    pub async fn seed(&self, account: Account) {
        self.accounts.write().await.insert(account.id, account);
    }

    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn find_by_identity(
        &self,
        identity: &IdentityKey,
    ) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.identity == *identity)
            .cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().await.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Account>, DomainError> {
        Ok(self.accounts.read().await.values().cloned().collect())
    }

    async fn update_status(
        &self,
        id: &AccountId,
        status: AccountStatus,
        block_reason: Option<String>,
    ) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(id)
            .ok_or_else(|| DomainError::new(ErrorCode::AccountNotFound, "no such account"))?;
        account.status = status;
        account.block_reason = block_reason;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::AccountRole;

    fn account(identity: &str) -> Account {
        Account::new(
            AccountId::new(),
            IdentityKey::new(identity).unwrap(),
            "Someone",
            AccountRole::Ordinary,
            AccountStatus::Pending,
        )
    }

    #[tokio::test]
    async fn seeded_account_is_found_by_identity_and_id() {
        let directory = InMemoryAccountDirectory::new();
        let acc = account("user@example.com");
        directory.seed(acc.clone()).await;

        let by_identity = directory
            .find_by_identity(&IdentityKey::new("user@example.com").unwrap())
            .await
            .unwrap();
        assert_eq!(by_identity, Some(acc.clone()));

        let by_id = directory.find_by_id(&acc.id).await.unwrap();
        assert_eq!(by_id, Some(acc));
    }

    #[tokio::test]
    async fn update_status_persists_status_and_reason() {
        let directory = InMemoryAccountDirectory::new();
        let acc = account("user@example.com");
        directory.seed(acc.clone()).await;

        directory
            .update_status(
                &acc.id,
                AccountStatus::Canceled,
                Some("subscription canceled".to_string()),
            )
            .await
            .unwrap();

        let stored = directory.find_by_id(&acc.id).await.unwrap().unwrap();
        assert_eq!(stored.status, AccountStatus::Canceled);
        assert_eq!(stored.block_reason.as_deref(), Some("subscription canceled"));
    }

    #[tokio::test]
    async fn update_status_of_unknown_account_fails() {
        let directory = InMemoryAccountDirectory::new();
        let result = directory
            .update_status(&AccountId::new(), AccountStatus::Active, None)
            .await;
        assert!(result.is_err());
    }
}
