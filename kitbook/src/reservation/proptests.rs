//! Property-based tests for `Reservation`, `UserId` and the overlap test.

use super::{periods_overlap, Reservation, UserId};
use crate::equipment::EquipmentId;
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default() + Duration::days(offset)
    })
}

fn period_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (date_strategy(), 0i64..60).prop_map(|(start, len)| (start, start + Duration::days(len)))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // Overlap is symmetric
    #[test]
    fn overlap_is_symmetric(a in period_strategy(), b in period_strategy()) {
        prop_assert_eq!(
            periods_overlap(a.0, a.1, b.0, b.1),
            periods_overlap(b.0, b.1, a.0, a.1)
        );
    }

    // A period always overlaps itself and any single day inside it
    #[test]
    fn overlap_is_reflexive(a in period_strategy(), offset in 0i64..60) {
        prop_assert!(periods_overlap(a.0, a.1, a.0, a.1));
        let day = a.0 + Duration::days(offset);
        if day <= a.1 {
            prop_assert!(periods_overlap(a.0, a.1, day, day));
        }
    }

    // Overlap matches a day-by-day intersection check
    #[test]
    fn overlap_matches_day_intersection(a in period_strategy(), b in period_strategy()) {
        let shares_a_day = a.0.iter_days()
            .take_while(|d| *d <= a.1)
            .any(|d| d >= b.0 && d <= b.1);
        prop_assert_eq!(periods_overlap(a.0, a.1, b.0, b.1), shares_a_day);
    }

    // Builder accepts exactly the ordered periods
    #[test]
    fn builder_accepts_ordered_periods(start in date_strategy(), end in date_strategy()) {
        let result = Reservation::builder(EquipmentId::new(1), UserId::new("olha").unwrap())
            .period(start, end)
            .build();
        prop_assert_eq!(result.is_ok(), start <= end);
        if let Ok(reservation) = result {
            prop_assert_eq!(reservation.duration_days(), (end - start).num_days());
        }
    }

    // User ids never carry surrounding whitespace
    #[test]
    fn user_id_is_trimmed(name in "[a-z]{1,20}", left in " {0,3}", right in "\t{0,3}") {
        let user = UserId::new(format!("{left}{name}{right}")).unwrap();
        prop_assert_eq!(user.as_str(), name.as_str());
    }
}
