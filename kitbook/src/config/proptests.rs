//! Property-based tests for configuration merging and validation.

use super::merger::ConfigMerger;
use super::schema::{BookingConfig, Config, DEFAULT_MAX_DURATION_DAYS};
use super::validator::ConfigValidator;
use proptest::prelude::*;
use std::collections::HashMap;

fn booking_strategy() -> impl Strategy<Value = BookingConfig> {
    (
        prop::option::of(1u32..=365),
        prop::option::of(
            prop::collection::btree_set("[A-Z][a-z]{2,10}", 0..3)
                .prop_map(|set| set.into_iter().collect::<Vec<_>>()),
        ),
    )
        .prop_map(|(max_duration_days, privileged_positions)| BookingConfig {
            max_duration_days,
            privileged_positions,
        })
}

fn members_strategy() -> impl Strategy<Value = HashMap<String, Vec<String>>> {
    prop::collection::hash_map(
        "[a-z]{3,10}",
        prop::collection::vec("[A-Z][a-z]{2,10}", 0..3),
        0..4,
    )
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(booking_strategy()),
        prop::option::of(members_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(1u64..=600),
    )
        .prop_map(
            |(booking, members, autoinit, autopurge, lock_wait)| Config {
                booking,
                members,
                disable_autoinit: autoinit,
                disable_autopurge: autopurge,
                maximum_lock_wait_seconds: lock_wait,
                ..Default::default()
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // Higher precedence wins for every scalar that it sets
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(
            result.disable_autoinit,
            high.disable_autoinit.or(low.disable_autoinit)
        );
        prop_assert_eq!(
            result.disable_autopurge,
            high.disable_autopurge.or(low.disable_autopurge)
        );
        prop_assert_eq!(
            result.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );

        let high_days = high.booking.as_ref().and_then(|b| b.max_duration_days);
        let low_days = low.booking.as_ref().and_then(|b| b.max_duration_days);
        prop_assert_eq!(
            result.max_duration_days(),
            high_days.or(low_days).unwrap_or(DEFAULT_MAX_DURATION_DAYS)
        );
    }

    // Empty config is identity element for merge
    #[test]
    fn config_merge_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // Every member of either side survives the merge
    #[test]
    fn config_merge_keeps_all_members(low in members_strategy(), high in members_strategy()) {
        let mut result = Config { members: Some(low.clone()), ..Default::default() };
        ConfigMerger::merge_into(&mut result, &Config { members: Some(high.clone()), ..Default::default() });

        for (user, positions) in &high {
            prop_assert_eq!(result.positions_of(user), positions.as_slice());
        }
        for (user, positions) in &low {
            if !high.contains_key(user) {
                prop_assert_eq!(result.positions_of(user), positions.as_slice());
            }
        }
    }

    // Generated configs are always valid, and stay valid after merging
    #[test]
    fn generated_configs_validate(a in config_strategy(), b in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&a).is_ok());
        let mut merged = a;
        ConfigMerger::merge_into(&mut merged, &b);
        prop_assert!(ConfigValidator::validate(&merged).is_ok());
    }
}
