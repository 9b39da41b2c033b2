//! Escalation Bridge handlers.

mod open_thread;
mod post_message;

pub use open_thread::{EscalationError, OpenThreadCommand, OpenThreadHandler, OpenedThread};
pub use post_message::{PollMessagesQuery, PostMessageCommand, PostMessageHandler};
