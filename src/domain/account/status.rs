//! Account billing status state machine.
//!
//! The status is mutated only by webhook reconciliation (automated) or an
//! administrative action; this module defines the states and which automated
//! transitions are legal.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Billing standing of an account.
///
/// A closed enumeration: an unrecognized stored value fails deserialization
/// at the directory boundary instead of silently mis-routing an access
/// decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Paid up; access is granted.
    Active,

    /// Awaiting first payment or verification. No access.
    Pending,

    /// Subscription canceled at the gateway. No access.
    Canceled,

    /// Payment refunded. No access.
    Refunded,

    /// Manually blocked by an operator. No access.
    Blocked,
}

impl AccountStatus {
    /// Returns true if this status grants access to the application.
    ///
    /// Only `Active` grants access; every other state is part of the
    /// blocking set.
    pub fn grants_access(&self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}

impl StateMachine for AccountStatus {
    /// The latest gateway event alone decides the derived standing, so any
    /// derived status (`Active`, `Canceled`, `Refunded`) is reachable from
    /// any other, in any order the gateway emits events. `Blocked` is the
    /// operator override, also reachable from anywhere. The one illegal
    /// target is `Pending`: it marks an account that has never reconciled,
    /// and no event or operator action moves an account back there.
    fn can_transition_to(&self, target: &Self) -> bool {
        !matches!(target, AccountStatus::Pending)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AccountStatus::*;
        vec![Active, Canceled, Refunded, Blocked]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AccountStatus; 5] = [
        AccountStatus::Active,
        AccountStatus::Pending,
        AccountStatus::Canceled,
        AccountStatus::Refunded,
        AccountStatus::Blocked,
    ];

    #[test]
    fn only_active_grants_access() {
        for status in ALL {
            assert_eq!(status.grants_access(), status == AccountStatus::Active);
        }
    }

    #[test]
    fn approved_payment_reactivates_any_state() {
        for status in ALL {
            assert!(
                status.can_transition_to(&AccountStatus::Active),
                "{:?} should allow transition to Active",
                status
            );
        }
    }

    #[test]
    fn derived_statuses_interchange_in_any_order() {
        // cancel -> re-pay -> refund -> re-pay, as the gateway may emit
        assert!(AccountStatus::Canceled.can_transition_to(&AccountStatus::Active));
        assert!(AccountStatus::Canceled.can_transition_to(&AccountStatus::Refunded));
        assert!(AccountStatus::Refunded.can_transition_to(&AccountStatus::Canceled));
        assert!(AccountStatus::Refunded.can_transition_to(&AccountStatus::Active));
    }

    #[test]
    fn no_status_returns_to_pending() {
        for status in ALL {
            assert!(!status.can_transition_to(&AccountStatus::Pending));
        }
    }

    #[test]
    fn active_can_be_canceled_or_refunded() {
        assert!(AccountStatus::Active.can_transition_to(&AccountStatus::Canceled));
        assert!(AccountStatus::Active.can_transition_to(&AccountStatus::Refunded));
    }

    #[test]
    fn no_status_is_terminal() {
        for status in ALL {
            assert!(!status.is_terminal());
        }
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&AccountStatus::Refunded).unwrap();
        assert_eq!(json, "\"refunded\"");
    }

    #[test]
    fn unknown_status_value_fails_deserialization() {
        let result: Result<AccountStatus, _> = serde_json::from_str("\"suspended\"");
        assert!(result.is_err());
    }

    #[test]
    fn valid_transitions_are_consistent_with_can_transition_to() {
        for status in ALL {
            for target in status.valid_transitions() {
                assert!(
                    status.can_transition_to(&target),
                    "can_transition_to should return true for {:?} -> {:?}",
                    status,
                    target
                );
            }
        }
    }
}
