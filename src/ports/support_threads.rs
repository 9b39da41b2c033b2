//! Support thread repository port.

use async_trait::async_trait;

use crate::domain::foundation::{AccountId, DomainError, ThreadId, Timestamp};
use crate::domain::support::{SupportThread, ThreadMessage};

/// Persistence boundary for escalation threads.
///
/// Message visibility is polling-based: each side calls
/// [`SupportThreadRepository::messages_since`] on its own interval (the
/// configured advisory staleness bound). Ordering is by server-assigned
/// timestamp only; no cross-call ordering is guaranteed.
#[async_trait]
pub trait SupportThreadRepository: Send + Sync {
    /// Finds the open thread of the given subject kind for an account,
    /// if one exists. The Escalation Bridge reuses it instead of opening
    /// a duplicate.
    async fn find_open_by_kind(
        &self,
        account_id: &AccountId,
        subject_kind: &str,
    ) -> Result<Option<SupportThread>, DomainError>;

    /// Finds a thread by id.
    async fn find_by_id(&self, id: &ThreadId) -> Result<Option<SupportThread>, DomainError>;

    /// Persists a new thread.
    async fn save(&self, thread: &SupportThread) -> Result<(), DomainError>;

    /// Updates an existing thread.
    async fn update(&self, thread: &SupportThread) -> Result<(), DomainError>;

    /// Messages of a thread with server timestamp strictly after `since`.
    async fn messages_since(
        &self,
        id: &ThreadId,
        since: Timestamp,
    ) -> Result<Vec<ThreadMessage>, DomainError>;
}
