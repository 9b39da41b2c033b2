//! Foundation value objects shared by every domain module.

mod errors;
mod ids;
mod period;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AccountId, IdentityKey, PaymentRecordId, ThreadId};
pub use period::BillingPeriod;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
