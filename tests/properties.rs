use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use proptest::prelude::*;

use natal_chart::time::julian_day_at_midnight;
use natal_chart::{assign_house, julian_day_ut, map_sign, universal_time, House};

/// Distance from `lon` to the nearest sign boundary, in degrees.
fn boundary_distance(lon: f64) -> f64 {
    let r = lon.rem_euclid(30.0);
    r.min(30.0 - r)
}

fn base_datetime() -> impl Strategy<Value = NaiveDateTime> {
    (1800i32..2200, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60).prop_map(|(y, mo, d, h, mi)| {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    })
}

proptest! {
    #[test]
    fn sign_is_periodic(lon in -720.0f64..720.0, k in -20i32..20) {
        prop_assume!(boundary_distance(lon) > 1e-6);
        let shifted = lon + 360.0 * k as f64;
        prop_assert_eq!(map_sign(lon).sign, map_sign(shifted).sign);
    }

    #[test]
    fn degree_stays_in_sign(lon in -1.0e6f64..1.0e6) {
        let pos = map_sign(lon);
        prop_assert!((0.0..30.0).contains(&pos.degree_in_sign));
        prop_assert!((0.0..360.0).contains(&pos.longitude));

        let rebuilt = pos.sign.index() as f64 * 30.0 + pos.degree_in_sign;
        let diff = (rebuilt - lon).rem_euclid(360.0);
        prop_assert!(diff.min(360.0 - diff) < 1e-6, "lon {} rebuilt {}", lon, rebuilt);
    }

    #[test]
    fn house_in_range_and_first_for_same_sign(body in 0.0f64..360.0, asc in 0.0f64..360.0) {
        let house = assign_house(body, asc);
        prop_assert!((1..=12).contains(&house.number()));
        if map_sign(body).sign == map_sign(asc).sign {
            prop_assert_eq!(house, House::First);
        }
    }

    #[test]
    fn house_ignores_full_turns(body in 0.0f64..360.0, asc in 0.0f64..360.0) {
        prop_assume!(boundary_distance(body) > 1e-6 && boundary_distance(asc) > 1e-6);
        prop_assert_eq!(assign_house(body, asc), assign_house(body + 360.0, asc));
        prop_assert_eq!(assign_house(body, asc), assign_house(body, asc + 360.0));
    }

    #[test]
    fn timezone_normalization_is_consistent(ut in base_datetime(), offset in -720i64..=840) {
        let local = ut + Duration::minutes(offset);

        let from_utc = julian_day_ut(ut.date(), ut.time(), 0.0);
        let from_local = julian_day_ut(local.date(), local.time(), offset as f64);
        prop_assert!((from_utc.value() - from_local.value()).abs() < 1e-8);
    }

    #[test]
    fn rolled_ut_matches_direct_conversion(local in base_datetime(), offset in -1440i64..=1440) {
        let ut = universal_time(local.date(), local.time(), offset as f64).unwrap();
        prop_assert!((0.0..24.0).contains(&ut.hour));

        let direct = julian_day_ut(local.date(), local.time(), offset as f64);
        prop_assert!((ut.julian_day().value() - direct.value()).abs() < 1e-8);

        let expected = local - Duration::minutes(offset);
        let expected_hour = expected.hour() as f64 + expected.minute() as f64 / 60.0;
        let expected_jd = julian_day_at_midnight(expected.date()) + expected_hour / 24.0;
        prop_assert!((ut.julian_day().value() - expected_jd).abs() < 1e-8);
    }
}

#[test]
fn negative_offset_rollover_example() {
    // 00:30 local, UTC-10:00
    let date = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap();
    let time = NaiveTime::from_hms_opt(0, 30, 0).unwrap();
    let ut = universal_time(date, time, -600.0).unwrap();
    assert_eq!(ut.date, date);
    assert!((ut.hour - 10.5).abs() < 1e-12);

    // 00:30 local, UTC+10:00 lands on the previous day
    let ut = universal_time(date, time, 600.0).unwrap();
    assert_eq!(ut.date, NaiveDate::from_ymd_opt(2015, 2, 28).unwrap());
    assert!((ut.hour - 14.5).abs() < 1e-12);
}
