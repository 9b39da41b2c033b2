//! PostMessageHandler - append a message to an escalation thread.

use std::sync::Arc;

use crate::domain::foundation::{ThreadId, Timestamp};
use crate::domain::support::{Sender, ThreadMessage};
use crate::ports::SupportThreadRepository;

use super::EscalationError;

#[derive(Debug, Clone)]
pub struct PostMessageCommand {
    pub thread_id: ThreadId,
    pub sender: Sender,
    pub sender_id: String,
    pub body: String,
}

/// Query for messages newer than the caller's last poll.
#[derive(Debug, Clone)]
pub struct PollMessagesQuery {
    pub thread_id: ThreadId,
    pub since: Timestamp,
}

/// Handler appending messages and serving the polling reads.
///
/// The timestamp on a posted message is server-assigned inside the
/// aggregate; client clocks never order the conversation.
pub struct PostMessageHandler {
    threads: Arc<dyn SupportThreadRepository>,
}

impl PostMessageHandler {
    pub fn new(threads: Arc<dyn SupportThreadRepository>) -> Self {
        Self { threads }
    }

    pub async fn handle(
        &self,
        command: PostMessageCommand,
    ) -> Result<ThreadMessage, EscalationError> {
        let mut thread = self
            .threads
            .find_by_id(&command.thread_id)
            .await?
            .ok_or(EscalationError::ThreadNotFound)?;

        let message = thread
            .post(command.sender, command.sender_id, command.body)?
            .clone();
        self.threads.update(&thread).await?;

        tracing::debug!(
            thread_id = %thread.id,
            sender = ?message.sender,
            "message posted to escalation thread"
        );

        Ok(message)
    }

    /// Messages with a server timestamp strictly after `since`; the
    /// caller's poll interval bounds staleness.
    pub async fn poll(
        &self,
        query: PollMessagesQuery,
    ) -> Result<Vec<ThreadMessage>, EscalationError> {
        if self.threads.find_by_id(&query.thread_id).await?.is_none() {
            return Err(EscalationError::ThreadNotFound);
        }
        Ok(self
            .threads
            .messages_since(&query.thread_id, query.since)
            .await?)
    }
}
