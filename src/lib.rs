//! Tollgate - Subscription gatekeeping and payment reconciliation.
//!
//! Turns signed payment gateway events into an auditable payment ledger,
//! derives account standing from that ledger, and answers the fail-closed
//! access question for every request.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
