use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveTime};
use serde_json::json;

use natal_chart::{
    build_natal_chart, BirthData, CelestialBody, ChartError, ErrorKind, FixedEphemeris,
    GeoLocation, House, ZodiacSign,
};

fn birth(date: (i32, u32, u32), time: (u32, u32), offset: f64) -> BirthData {
    BirthData {
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        time: NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap(),
        timezone_offset_minutes: offset,
        location: GeoLocation::new(51.5, -0.13),
    }
}

#[test]
fn j2000_noon_lands_on_reference_epoch() {
    let birth = birth((2000, 1, 1), (12, 0), 0.0);
    assert_relative_eq!(birth.julian_day().value(), 2_451_545.0, epsilon = 1e-9);
}

#[test]
fn offsets_are_removed_before_the_engine_is_asked() {
    // 00:30 at UTC-10 is 10:30 UT the same day
    let west = birth((2015, 3, 1), (0, 30), -600.0);
    assert_relative_eq!(west.julian_day().value(), 2_457_082.5 + 10.5 / 24.0, epsilon = 1e-9);

    // 00:30 at UTC+10 is 14:30 UT on the previous day
    let east = birth((2015, 3, 1), (0, 30), 600.0);
    assert_relative_eq!(east.julian_day().value(), 2_457_081.5 + 14.5 / 24.0, epsilon = 1e-9);
}

#[test]
fn serialized_chart_uses_wire_names() {
    let chart = build_natal_chart(&FixedEphemeris::j2000(), &birth((2000, 1, 1), (12, 0), 0.0))
        .unwrap();
    let value = serde_json::to_value(&chart).unwrap();

    assert_eq!(value["ascendant"]["sign"], "Aries");
    assert_eq!(value["houses"][0], json!({ "house": 1, "cuspLongitude": 0.0, "sign": "Aries" }));
    assert_eq!(value["houses"][11]["sign"], "Pisces");
    assert_eq!(value["planets"]["moon"]["sign"], "Scorpio");
    assert_eq!(value["planets"]["moon"]["house"], 8);
    assert!(value["planets"]["mars"]["degreeInSign"].is_number());
}

#[test]
fn every_body_in_the_ascendant_sign_is_first_house() {
    let eph = FixedEphemeris::new(100.0).with_all_bodies(95.0);
    let chart = build_natal_chart(&eph, &birth((1990, 6, 15), (8, 45), 120.0)).unwrap();

    assert_eq!(chart.ascendant.sign, ZodiacSign::Cancer);
    assert_eq!(chart.occupants(House::First).len(), 7);
    for house in House::all().skip(1) {
        assert!(chart.occupants(house).is_empty());
    }
}

#[test]
fn house_count_wraps_past_pisces() {
    let eph = FixedEphemeris::new(345.0)
        .with_all_bodies(345.0)
        .with_body(CelestialBody::Venus, 5.0)
        .with_body(CelestialBody::Mars, 325.0)
        .with_body(CelestialBody::Jupiter, 335.0);
    let chart = build_natal_chart(&eph, &birth((1985, 11, 2), (23, 10), -300.0)).unwrap();

    assert_eq!(chart.placement(CelestialBody::Venus).unwrap().house, House::Second);
    assert_eq!(chart.placement(CelestialBody::Mars).unwrap().house, House::Twelfth);
    assert_eq!(chart.placement(CelestialBody::Jupiter).unwrap().house, House::First);
    assert_eq!(chart.cusp(House::Second).unwrap().sign, ZodiacSign::Aries);
}

#[test]
fn missing_body_fails_the_whole_chart() {
    // no longitude configured for any body
    let eph = FixedEphemeris::new(0.0);
    let err = build_natal_chart(&eph, &birth((2000, 1, 1), (12, 0), 0.0)).unwrap_err();

    assert!(matches!(err, ChartError::Ephemeris(_)));
    assert_eq!(err.kind(), ErrorKind::EngineFailure);
    assert_eq!(eph.calls(), 1);
}
