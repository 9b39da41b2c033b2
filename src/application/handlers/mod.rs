//! Command and query handlers, one per exposed operation.
//!
//! Handlers hold their collaborators as `Arc<dyn Port>` and contain the
//! orchestration; domain rules live in the aggregates they drive.

pub mod access;
pub mod billing;
pub mod credential;
pub mod support;
