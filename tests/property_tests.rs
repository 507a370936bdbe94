//! Property-based tests for the pure pieces of the stock core: the status
//! transition table, direction inversion, and the ledger delta arithmetic
//! that cancellation relies on.

use proptest::prelude::*;

use stockroom::entities::movement_record::MovementDirection;
use stockroom::entities::stock_document::{DocumentDirection, DocumentStatus};

fn status_strategy() -> impl Strategy<Value = DocumentStatus> {
    prop_oneof![
        Just(DocumentStatus::Draft),
        Just(DocumentStatus::Pending),
        Just(DocumentStatus::Completed),
        Just(DocumentStatus::Cancelled),
    ]
}

fn direction_strategy() -> impl Strategy<Value = DocumentDirection> {
    prop_oneof![
        Just(DocumentDirection::Entry),
        Just(DocumentDirection::Exit),
    ]
}

const ALLOWED_TRANSITIONS: &[(DocumentStatus, DocumentStatus)] = &[
    (DocumentStatus::Draft, DocumentStatus::Pending),
    (DocumentStatus::Pending, DocumentStatus::Completed),
    (DocumentStatus::Draft, DocumentStatus::Cancelled),
    (DocumentStatus::Pending, DocumentStatus::Cancelled),
    (DocumentStatus::Completed, DocumentStatus::Cancelled),
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn transition_table_matches_the_explicit_whitelist(
        from in status_strategy(),
        to in status_strategy(),
    ) {
        let allowed = ALLOWED_TRANSITIONS.contains(&(from, to));
        prop_assert_eq!(
            DocumentStatus::can_transition(from, to),
            allowed,
            "transition {:?} -> {:?}", from, to
        );
    }

    #[test]
    fn cancelled_never_transitions_anywhere(to in status_strategy()) {
        prop_assert!(!DocumentStatus::can_transition(DocumentStatus::Cancelled, to));
    }

    #[test]
    fn unknown_status_strings_do_not_parse(s in "[a-z]{1,12}") {
        let known = ["draft", "pending", "completed", "cancelled"];
        prop_assert_eq!(DocumentStatus::from_str(&s).is_some(), known.contains(&s.as_str()));
    }
}

proptest! {
    #[test]
    fn direction_inverse_is_an_involution(direction in direction_strategy()) {
        let movement = MovementDirection::from(direction);
        prop_assert_eq!(movement.inverse().inverse(), movement);
        prop_assert_ne!(movement.inverse(), movement);
    }

    #[test]
    fn entry_deltas_are_positive_and_exit_deltas_negative(
        direction in direction_strategy(),
        quantity in 1i32..100_000,
    ) {
        let delta = quantity * direction.quantity_sign();
        match direction {
            DocumentDirection::Entry => prop_assert!(delta > 0),
            DocumentDirection::Exit => prop_assert!(delta < 0),
        }
    }

    // Completing then cancelling a document must restore every product
    // quantity: the reversal delta is the exact inverse of the original.
    #[test]
    fn reversal_deltas_cancel_out_over_any_line_set(
        direction in direction_strategy(),
        initial in 0i32..1_000_000,
        quantities in prop::collection::vec(1i32..1_000, 0..10),
    ) {
        let mut on_hand = initial;
        let mut applied = Vec::new();
        for q in &quantities {
            let delta = q * direction.quantity_sign();
            if on_hand + delta < 0 {
                // the ledger would reject this line and roll everything back
                on_hand = initial;
                applied.clear();
                break;
            }
            on_hand += delta;
            applied.push(delta);
        }
        for delta in applied {
            on_hand -= delta;
        }
        prop_assert_eq!(on_hand, initial);
    }

    #[test]
    fn quantities_never_observably_negative(
        initial in 0i32..500,
        requested in 1i32..1_000,
    ) {
        // mirrors the ledger check: the delta is applied only if the
        // result stays non-negative
        let delta = -requested;
        let applied = if initial + delta >= 0 { initial + delta } else { initial };
        prop_assert!(applied >= 0);
    }
}
