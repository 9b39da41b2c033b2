//! Support thread aggregate for denial-triggered escalation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{AccountId, StateMachine, ThreadId, Timestamp, ValidationError};

/// Subject kind used for denial-triggered escalation threads.
pub const BILLING_URGENT: &str = "billing-urgent";

/// Support thread failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupportError {
    #[error("message body cannot be empty")]
    EmptyBody,

    #[error("thread is closed")]
    ThreadClosed,
}

/// Lifecycle status of a support thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadStatus {
    Open,
    Closed,
}

impl StateMachine for ThreadStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (ThreadStatus::Open, ThreadStatus::Closed)
                | (ThreadStatus::Closed, ThreadStatus::Open)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            ThreadStatus::Open => vec![ThreadStatus::Closed],
            ThreadStatus::Closed => vec![ThreadStatus::Open],
        }
    }
}

/// Which side of the conversation authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The account holder.
    Account,
    /// A support operator.
    Support,
    /// Automated context message written when the thread opens.
    System,
}

/// One message in a thread; ordering is by server-assigned timestamp only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub sender: Sender,
    pub sender_id: String,
    pub body: String,
    pub sent_at: Timestamp,
}

/// A prioritized support conversation for one account.
///
/// Reused while still open; the Escalation Bridge never opens a second
/// `billing-urgent` thread for the same account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportThread {
    pub id: ThreadId,
    pub account_id: AccountId,
    pub subject_kind: String,
    pub status: ThreadStatus,
    pub unread_for_account: bool,
    pub unread_for_support: bool,
    pub messages: Vec<ThreadMessage>,
    pub created_at: Timestamp,
    pub last_activity_at: Timestamp,
}

impl SupportThread {
    /// Opens a billing-urgent thread with a system-authored first message
    /// summarizing the account context.
    pub fn open_billing_urgent(account_id: AccountId, context_summary: String) -> Self {
        let now = Timestamp::now();
        Self {
            id: ThreadId::new(),
            account_id,
            subject_kind: BILLING_URGENT.to_string(),
            status: ThreadStatus::Open,
            unread_for_account: false,
            unread_for_support: true,
            messages: vec![ThreadMessage {
                sender: Sender::System,
                sender_id: "system".to_string(),
                body: context_summary,
                sent_at: now,
            }],
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Appends a message, stamping it with a server-assigned timestamp.
    ///
    /// Updates the last-activity marker and flips the opposite side's
    /// unread flag. Rejects empty bodies and closed threads.
    pub fn post(
        &mut self,
        sender: Sender,
        sender_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<&ThreadMessage, SupportError> {
        if self.status == ThreadStatus::Closed {
            return Err(SupportError::ThreadClosed);
        }
        let body = body.into();
        if body.trim().is_empty() {
            return Err(SupportError::EmptyBody);
        }

        let now = Timestamp::now();
        self.messages.push(ThreadMessage {
            sender,
            sender_id: sender_id.into(),
            body,
            sent_at: now,
        });
        self.last_activity_at = now;
        match sender {
            Sender::Account => self.unread_for_support = true,
            Sender::Support | Sender::System => self.unread_for_account = true,
        }

        Ok(self.messages.last().expect("just pushed"))
    }

    /// Messages with a server timestamp strictly after `since`.
    ///
    /// This is the polling contract: staleness is bounded only by the
    /// caller's poll interval, ordering only by the returned timestamps.
    pub fn messages_since(&self, since: Timestamp) -> Vec<&ThreadMessage> {
        self.messages
            .iter()
            .filter(|m| m.sent_at.is_after(&since))
            .collect()
    }

    /// Marks the thread read for one side.
    pub fn mark_read(&mut self, side: Sender) {
        match side {
            Sender::Account => self.unread_for_account = false,
            Sender::Support => self.unread_for_support = false,
            Sender::System => {}
        }
    }

    /// Closes the thread.
    pub fn close(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(ThreadStatus::Closed)?;
        Ok(())
    }
}
