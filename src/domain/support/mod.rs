//! Support domain: escalation threads for denied accounts.

mod thread;

pub use thread::{
    Sender, SupportError, SupportThread, ThreadMessage, ThreadStatus, BILLING_URGENT,
};
