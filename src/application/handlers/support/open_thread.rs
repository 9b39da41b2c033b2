//! OpenThreadHandler - open or reuse the billing-urgent thread.
//!
//! A denied account gets exactly one open escalation thread. Opening is
//! idempotent: while a billing-urgent thread is open for the account, the
//! handler returns it instead of creating a second one.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::account::Account;
use crate::domain::foundation::{AccountId, DomainError};
use crate::domain::support::{SupportError, SupportThread, BILLING_URGENT};
use crate::ports::{AccountDirectory, SupportThreadRepository};

#[derive(Debug, Clone)]
pub struct OpenThreadCommand {
    pub account_id: AccountId,
}

#[derive(Debug, Error)]
pub enum EscalationError {
    #[error("account not found")]
    AccountNotFound,

    #[error("thread not found")]
    ThreadNotFound,

    #[error(transparent)]
    Thread(#[from] SupportError),

    #[error(transparent)]
    Infrastructure(#[from] DomainError),
}

/// The opened (or reused) thread.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenedThread {
    pub thread: SupportThread,
    /// True when an existing open thread was returned instead of a new one.
    pub reused: bool,
}

pub struct OpenThreadHandler {
    directory: Arc<dyn AccountDirectory>,
    threads: Arc<dyn SupportThreadRepository>,
}

impl OpenThreadHandler {
    pub fn new(
        directory: Arc<dyn AccountDirectory>,
        threads: Arc<dyn SupportThreadRepository>,
    ) -> Self {
        Self { directory, threads }
    }

    pub async fn handle(
        &self,
        command: OpenThreadCommand,
    ) -> Result<OpenedThread, EscalationError> {
        let account = self
            .directory
            .find_by_id(&command.account_id)
            .await?
            .ok_or(EscalationError::AccountNotFound)?;

        if let Some(existing) = self
            .threads
            .find_open_by_kind(&account.id, BILLING_URGENT)
            .await?
        {
            tracing::debug!(
                account_id = %account.id,
                thread_id = %existing.id,
                "reusing open billing-urgent thread"
            );
            return Ok(OpenedThread {
                thread: existing,
                reused: true,
            });
        }

        let thread = SupportThread::open_billing_urgent(account.id, context_summary(&account));
        self.threads.save(&thread).await?;

        tracing::info!(
            account_id = %account.id,
            thread_id = %thread.id,
            "billing-urgent thread opened"
        );

        Ok(OpenedThread {
            thread,
            reused: false,
        })
    }
}

/// First-message context for the support side: who is blocked and why.
fn context_summary(account: &Account) -> String {
    let why = account
        .block_reason
        .as_deref()
        .unwrap_or("account is not in good standing");
    format!(
        "Account {} ({}) was denied access: {}",
        account.name,
        account.identity.as_str(),
        why
    )
}
