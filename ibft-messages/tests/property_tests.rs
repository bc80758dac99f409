//! Property-based tests for subscription matching
//!
//! These tests use proptest to verify:
//! - Exact-round subscriptions match only identical (type, height, round)
//! - Minimum-round subscriptions match later rounds at the same height
//! - Height and type mismatches never match in either mode

use ibft_messages::{MessageType, SubscriptionDetails, SubscriptionRegistry, View};
use proptest::prelude::*;

fn message_type() -> impl Strategy<Value = MessageType> {
    prop::sample::select(MessageType::ALL.to_vec())
}

fn small() -> impl Strategy<Value = u64> {
    // Small range so equal values actually occur.
    0u64..8
}

proptest! {
    #[test]
    fn test_exact_round_matches_only_identical(
        sub_type in message_type(),
        event_type in message_type(),
        sub_height in small(),
        sub_round in small(),
        event_height in small(),
        event_round in small(),
    ) {
        let registry = SubscriptionRegistry::new();
        let details = SubscriptionDetails::new(sub_type, View::new(sub_height, sub_round), 1);
        let handle = registry.subscribe(details).unwrap();

        let expected = sub_type == event_type
            && sub_height == event_height
            && sub_round == event_round;
        prop_assert_eq!(
            handle.event_supported(event_type, View::new(event_height, event_round)),
            expected
        );
    }

    #[test]
    fn test_min_round_matches_later_rounds(
        sub_type in message_type(),
        event_type in message_type(),
        sub_height in small(),
        sub_round in small(),
        event_height in small(),
        event_round in small(),
    ) {
        let registry = SubscriptionRegistry::new();
        let details =
            SubscriptionDetails::new(sub_type, View::new(sub_height, sub_round), 1).with_min_round();
        let handle = registry.subscribe(details).unwrap();

        let expected = sub_type == event_type
            && sub_height == event_height
            && event_round >= sub_round;
        prop_assert_eq!(
            handle.event_supported(event_type, View::new(event_height, event_round)),
            expected
        );
    }

    #[test]
    fn test_height_mismatch_never_matches(
        sub_type in message_type(),
        height in 1u64..u64::MAX,
        round in any::<u64>(),
        event_round in any::<u64>(),
        higher in any::<bool>(),
        has_min_round in any::<bool>(),
    ) {
        let registry = SubscriptionRegistry::new();
        let mut details = SubscriptionDetails::new(sub_type, View::new(height, round), 1);
        details.has_min_round = has_min_round;
        let handle = registry.subscribe(details).unwrap();

        let event_height = if higher { height + 1 } else { height - 1 };
        prop_assert!(!handle.event_supported(sub_type, View::new(event_height, event_round)));
    }

    #[test]
    fn test_dispatch_below_threshold_delivers_nothing(
        threshold in 1usize..64,
        count in 0usize..64,
    ) {
        let registry = SubscriptionRegistry::new();
        let view = View::new(0, 0);
        let handle = registry
            .subscribe(SubscriptionDetails::new(MessageType::Commit, view, threshold))
            .unwrap();

        registry.dispatch(MessageType::Commit, view, count);
        let delivered = handle.try_recv();
        if count >= threshold {
            prop_assert_eq!(delivered.map(|n| n.count), Some(count));
        } else {
            prop_assert_eq!(delivered, None);
        }
    }
}
