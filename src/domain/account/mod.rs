//! Account domain: the billable identity guarding access.

mod account;
mod role;
mod status;

pub use account::Account;
pub use role::AccountRole;
pub use status::AccountStatus;
