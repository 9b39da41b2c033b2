//! Domain layer: pure types and logic, no I/O.

pub mod account;
pub mod billing;
pub mod credential;
pub mod foundation;
pub mod support;
