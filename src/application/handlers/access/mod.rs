//! Access Gate handlers.

mod evaluate_access;

pub use evaluate_access::{
    AccessDecision, DenyReason, EvaluateAccessHandler, EvaluateAccessQuery,
};
