//! In-memory support thread repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{AccountId, DomainError, ErrorCode, ThreadId, Timestamp};
use crate::domain::support::{SupportThread, ThreadMessage, ThreadStatus};
use crate::ports::SupportThreadRepository;

/// In-memory store of escalation threads keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemorySupportThreads {
    threads: Arc<RwLock<HashMap<ThreadId, SupportThread>>>,
}

impl InMemorySupportThreads {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.threads.read().await.len()
    }
}

#[async_trait]
impl SupportThreadRepository for InMemorySupportThreads {
    async fn find_open_by_kind(
        &self,
        account_id: &AccountId,
        subject_kind: &str,
    ) -> Result<Option<SupportThread>, DomainError> {
        Ok(self
            .threads
            .read()
            .await
            .values()
            .find(|t| {
                t.account_id == *account_id
                    && t.subject_kind == subject_kind
                    && t.status == ThreadStatus::Open
            })
            .cloned())
    }

    async fn find_by_id(&self, id: &ThreadId) -> Result<Option<SupportThread>, DomainError> {
        Ok(self.threads.read().await.get(id).cloned())
    }

    async fn save(&self, thread: &SupportThread) -> Result<(), DomainError> {
        self.threads
            .write()
            .await
            .insert(thread.id, thread.clone());
        Ok(())
    }

    async fn update(&self, thread: &SupportThread) -> Result<(), DomainError> {
        let mut threads = self.threads.write().await;
        if !threads.contains_key(&thread.id) {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                "thread does not exist",
            ));
        }
        threads.insert(thread.id, thread.clone());
        Ok(())
    }

    async fn messages_since(
        &self,
        id: &ThreadId,
        since: Timestamp,
    ) -> Result<Vec<ThreadMessage>, DomainError> {
        Ok(self
            .threads
            .read()
            .await
            .get(id)
            .map(|t| t.messages_since(since).into_iter().cloned().collect())
            .unwrap_or_default())
    }
}
