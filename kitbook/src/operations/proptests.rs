//! Property-based tests for the booking rules and the purge.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use super::book::{check_period, validate_and_book, BookOptions};
use super::cleanup::CleanupOperations;
use crate::config::Config;
use crate::database::test_util::{
    create_test_database, create_test_equipment, create_test_reservation,
};
use crate::database::Database;
use crate::error::BookingRejection;
use crate::reservation::UserId;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).unwrap_or_default()
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (-90i64..180).prop_map(|offset| today() + Duration::days(offset))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 5000,
        max_shrink_iters: 5000,
        .. ProptestConfig::default()
    })]

    // A reversed range is always reported as such, whatever else is wrong
    #[test]
    fn reversed_range_always_invalid(start in date_strategy(), gap in 1i64..400, max in 0u32..60) {
        let end = start - Duration::days(gap);
        prop_assert_eq!(
            check_period(start, end, today(), max),
            Err(BookingRejection::InvalidRange { start, end })
        );
    }

    // A past start is reported before the duration
    #[test]
    fn past_start_precedes_duration(back in 1i64..90, len in 0i64..400) {
        let start = today() - Duration::days(back);
        let end = start + Duration::days(len);
        let result = check_period(start, end, today(), 30);
        prop_assert_eq!(
            result,
            Err(BookingRejection::PastStartDate { start, today: today() })
        );
    }

    // The duration rule is exactly "more than max whole days"
    #[test]
    fn duration_rule_threshold(ahead in 0i64..90, len in 0i64..90, max in 0u32..60) {
        let start = today() + Duration::days(ahead);
        let end = start + Duration::days(len);
        let result = check_period(start, end, today(), max);
        if len > i64::from(max) {
            prop_assert_eq!(result, Err(BookingRejection::DurationExceeded { days: len, max_days: max }));
        } else {
            prop_assert_eq!(result, Ok(()));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        max_shrink_iters: 64,
        .. ProptestConfig::default()
    })]

    // Accepted bookings of one piece of equipment never share a day
    #[test]
    fn accepted_bookings_never_overlap(
        requests in prop::collection::vec((0i64..40, 0i64..6), 1..12)
    ) {
        let mut db = create_test_database();
        let tent = create_test_equipment(&mut db, "Tent");
        let config = Config::default();
        let user = UserId::new("olena").unwrap();

        for (ahead, len) in requests {
            let start = today() + Duration::days(ahead);
            let options = BookOptions::new(tent, start, start + Duration::days(len), user.clone())
                .with_today(today());
            let _ = validate_and_book(&mut db, &config, options);
        }

        let stored = Database::list_reservations_for_equipment(db.connection(), tent)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        for pair in stored.windows(2) {
            prop_assert!(pair[0].end() < pair[1].start());
        }
    }

    // A second purge on the same day removes nothing
    #[test]
    fn purge_is_idempotent(ends in prop::collection::vec(-20i64..20, 0..10), ahead in 0i64..10) {
        let mut db = create_test_database();
        let tent = create_test_equipment(&mut db, "Tent");
        for end in ends {
            let end = today() + Duration::days(end);
            db.insert_reservation(&create_test_reservation(tent, "olena", end, end))
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
        }

        let purge_day = today() + Duration::days(ahead);
        CleanupOperations::purge_expired(&mut db, purge_day, false)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let second = CleanupOperations::purge_expired(&mut db, purge_day, false)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(second.removed_count, 0);
    }
}
