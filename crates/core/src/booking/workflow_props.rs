//! Property-based tests for BookingWorkflow.

use proptest::prelude::*;

use crate::booking::error::BookingError;
use crate::booking::types::{BookingAction, BookingStatus};
use crate::booking::workflow::BookingWorkflow;

/// Strategy for generating random BookingStatus values.
fn arb_status() -> impl Strategy<Value = BookingStatus> {
    prop_oneof![
        Just(BookingStatus::Pending),
        Just(BookingStatus::Confirmed),
        Just(BookingStatus::Cancelled),
        Just(BookingStatus::Completed),
    ]
}

fn arb_action() -> impl Strategy<Value = BookingAction> {
    prop_oneof![
        Just(BookingAction::Confirm),
        Just(BookingAction::Cancel),
        Just(BookingAction::Complete),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Applying an action succeeds exactly when the transition table allows it.
    #[test]
    fn prop_apply_agrees_with_table(from in arb_status(), action in arb_action()) {
        let to = action.target_status();
        match BookingWorkflow::apply(from, action) {
            Ok(next) => {
                prop_assert_eq!(next, to);
                prop_assert!(BookingWorkflow::is_valid_transition(from, to));
            }
            Err(BookingError::InvalidTransition { from: f, to: t }) => {
                prop_assert_eq!(f, from);
                prop_assert_eq!(t, to);
                prop_assert!(!BookingWorkflow::is_valid_transition(from, to));
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }

    /// Terminal statuses reject every action.
    #[test]
    fn prop_terminal_is_final(from in arb_status(), action in arb_action()) {
        if from.is_terminal() {
            prop_assert!(BookingWorkflow::apply(from, action).is_err());
        }
    }

    /// Any sequence of actions never returns to pending.
    #[test]
    fn prop_status_never_returns_to_pending(
        actions in prop::collection::vec(arb_action(), 0..8)
    ) {
        let mut status = BookingStatus::Pending;
        for action in actions {
            if let Ok(next) = BookingWorkflow::apply(status, action) {
                prop_assert_ne!(next, BookingStatus::Pending);
                status = next;
            }
        }
    }

    /// Confirmed and completed bookings are never editable.
    #[test]
    fn prop_editable_excludes_confirmed_and_completed(status in arb_status()) {
        let editable = BookingWorkflow::ensure_editable(status).is_ok();
        prop_assert_eq!(
            editable,
            !matches!(status, BookingStatus::Confirmed | BookingStatus::Completed)
        );
    }
}
