use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::{debug, info};

use crate::ephemeris::{Ephemeris, GeoLocation, HouseSystem};
use crate::error::ChartError;
use crate::house::{assign_house, sign_of_house, House};
use crate::time::{julian_day_ut, universal_time, JulianDayUt, UtInstant};
use crate::zodiac::{map_sign, normalize_degrees, SignPosition, ZodiacSign};
use crate::CelestialBody;

/// Largest gap, in degrees, tolerated between an engine cusp and the sign
/// boundary whole-sign houses put it on.
pub const CUSP_TOLERANCE_DEG: f64 = 1e-6;

// ---------------------------
// ## Structures
// ---------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BirthData {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Minutes east of UTC.
    pub timezone_offset_minutes: f64,
    pub location: GeoLocation,
}

impl BirthData {
    pub fn julian_day(&self) -> JulianDayUt {
        julian_day_ut(self.date, self.time, self.timezone_offset_minutes)
    }

    /// Calendar date and hour in UT. `None` only at the edges of chrono's range.
    pub fn universal_time(&self) -> Option<UtInstant> {
        universal_time(self.date, self.time, self.timezone_offset_minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPlacement {
    pub longitude: f64,
    pub sign: ZodiacSign,
    pub degree_in_sign: f64,
    pub house: House,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseCusp {
    pub house: House,
    pub cusp_longitude: f64,
    pub sign: ZodiacSign,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub ascendant: SignPosition,
    /// Always 12 entries, houses 1..=12 in order.
    pub houses: Vec<HouseCusp>,
    pub planets: BTreeMap<CelestialBody, BodyPlacement>,
}

impl Chart {
    pub fn placement(&self, body: CelestialBody) -> Option<&BodyPlacement> {
        self.planets.get(&body)
    }

    pub fn cusp(&self, house: House) -> Option<&HouseCusp> {
        self.houses.get(house.number() as usize - 1)
    }

    /// Bodies occupying `house`, in body order.
    pub fn occupants(&self, house: House) -> Vec<CelestialBody> {
        self.planets
            .iter()
            .filter(|(_, placement)| placement.house == house)
            .map(|(body, _)| *body)
            .collect()
    }
}

// ---------------------------
// ## Assembly
// ---------------------------

/// Build a natal chart from birth data.
///
/// Every body is placed in a whole-sign house counted from the ascendant's
/// sign. The engine's cusps are reported as-is once they are confirmed to sit
/// on the expected sign boundaries. Any engine failure fails the whole chart.
pub fn build_natal_chart(
    engine: &dyn Ephemeris,
    birth: &BirthData,
) -> Result<Chart, ChartError> {
    let time = birth.julian_day();
    match birth.universal_time() {
        Some(ut) => debug!(%time, ut_date = %ut.date, ut_hour = ut.hour, "computing natal chart"),
        None => debug!(%time, date = %birth.date, clock = %birth.time, "computing natal chart"),
    }

    let mut positions = Vec::with_capacity(7);
    for body in CelestialBody::iter() {
        let raw = engine.body_longitude(time, body)?;
        debug!(%body, raw, "body longitude");
        positions.push((body, map_sign(raw)));
    }

    let raw_houses = engine.houses(time, birth.location, HouseSystem::WholeSign)?;
    let ascendant = map_sign(raw_houses.ascendant);
    debug!(longitude = ascendant.longitude, sign = %ascendant.sign, "ascendant");

    let houses = whole_sign_cusps(&raw_houses.cusps, ascendant.sign)?;

    let planets = positions
        .into_iter()
        .map(|(body, position)| {
            let placement = BodyPlacement {
                longitude: position.longitude,
                sign: position.sign,
                degree_in_sign: position.degree_in_sign,
                house: assign_house(position.longitude, ascendant.longitude),
            };
            (body, placement)
        })
        .collect();

    info!(ascendant = %ascendant.sign, %time, "natal chart computed");

    Ok(Chart {
        ascendant,
        houses,
        planets,
    })
}

/// Check engine cusps against whole-sign boundaries and pair them with houses.
fn whole_sign_cusps(
    raw_cusps: &[f64; 12],
    ascendant_sign: ZodiacSign,
) -> Result<Vec<HouseCusp>, ChartError> {
    House::all()
        .zip(raw_cusps.iter())
        .map(|(house, raw)| {
            let cusp_longitude = normalize_degrees(*raw);
            let expected = sign_of_house(house, ascendant_sign);
            let expected_longitude = expected.start_longitude();

            if angular_distance(cusp_longitude, expected_longitude) > CUSP_TOLERANCE_DEG {
                return Err(ChartError::InconsistentCusps {
                    house: house.number(),
                    cusp_longitude,
                    expected,
                    expected_longitude,
                });
            }

            // Snap onto the boundary so the cusp maps back to its own sign.
            Ok(HouseCusp {
                house,
                cusp_longitude: expected_longitude,
                sign: expected,
            })
        })
        .collect()
}

/// Shortest separation of two longitudes on the circle, in [0, 180].
fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{EphemerisError, FixedEphemeris};
    use approx::assert_relative_eq;

    fn birth() -> BirthData {
        BirthData {
            date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            timezone_offset_minutes: 0.0,
            location: GeoLocation::new(0.0, 0.0),
        }
    }

    #[test]
    fn assembles_all_bodies_and_houses() {
        let chart = build_natal_chart(&FixedEphemeris::j2000(), &birth()).unwrap();

        assert_eq!(chart.planets.len(), 7);
        assert_eq!(chart.houses.len(), 12);
        for (i, cusp) in chart.houses.iter().enumerate() {
            assert_eq!(cusp.house.number() as usize, i + 1);
        }
        assert_eq!(chart.ascendant.sign, ZodiacSign::Aries);

        let sun = chart.placement(CelestialBody::Sun).unwrap();
        assert_eq!(sun.sign, ZodiacSign::Capricorn);
        assert_eq!(sun.house, House::Tenth);
        assert_relative_eq!(sun.degree_in_sign, 10.37, epsilon = 1e-9);

        let saturn = chart.placement(CelestialBody::Saturn).unwrap();
        assert_eq!(saturn.sign, ZodiacSign::Taurus);
        assert_eq!(saturn.house, House::Second);
    }

    #[test]
    fn normalizes_engine_longitudes() {
        let eph = FixedEphemeris::new(-350.0).with_all_bodies(-90.0);
        let chart = build_natal_chart(&eph, &birth()).unwrap();

        assert_relative_eq!(chart.ascendant.longitude, 10.0);
        let moon = chart.placement(CelestialBody::Moon).unwrap();
        assert_relative_eq!(moon.longitude, 270.0);
        assert_eq!(moon.sign, ZodiacSign::Capricorn);
        assert_eq!(moon.house, House::Tenth);
    }

    #[test]
    fn boundary_body_goes_to_second_house() {
        let eph = FixedEphemeris::new(29.999)
            .with_all_bodies(10.0)
            .with_body(CelestialBody::Mars, 30.001);
        let chart = build_natal_chart(&eph, &birth()).unwrap();

        assert_eq!(chart.placement(CelestialBody::Mars).unwrap().house, House::Second);
        assert_eq!(chart.placement(CelestialBody::Sun).unwrap().house, House::First);
        assert_eq!(chart.occupants(House::Second), vec![CelestialBody::Mars]);
    }

    #[test]
    fn first_cusp_starts_the_ascendant_sign() {
        let eph = FixedEphemeris::new(200.5).with_all_bodies(0.0);
        let chart = build_natal_chart(&eph, &birth()).unwrap();

        let first = chart.cusp(House::First).unwrap();
        assert_eq!(first.sign, ZodiacSign::Libra);
        assert_relative_eq!(first.cusp_longitude, 180.0);
        let twelfth = chart.cusp(House::Twelfth).unwrap();
        assert_eq!(twelfth.sign, ZodiacSign::Virgo);
    }

    #[test]
    fn rejects_cusps_off_the_sign_boundaries() {
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = 12.0 + 30.0 * i as f64;
        }
        let eph = FixedEphemeris::new(12.0).with_all_bodies(0.0).with_cusps(cusps);
        let err = build_natal_chart(&eph, &birth()).unwrap_err();

        assert!(matches!(err, ChartError::InconsistentCusps { house: 1, .. }));
    }

    #[test]
    fn tolerates_rounding_noise_on_cusps() {
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = 30.0 * i as f64 - 1e-9;
        }
        let eph = FixedEphemeris::new(5.0).with_all_bodies(0.0).with_cusps(cusps);
        let chart = build_natal_chart(&eph, &birth()).unwrap();

        assert_eq!(chart.cusp(House::Second).unwrap().sign, ZodiacSign::Taurus);
        assert_eq!(chart.cusp(House::First).unwrap().sign, ZodiacSign::Aries);
        for cusp in &chart.houses {
            assert_eq!(cusp.sign, map_sign(cusp.cusp_longitude).sign, "house {:?}", cusp.house);
        }
        assert_eq!(chart.cusp(House::First).unwrap().cusp_longitude, 0.0);
    }

    #[test]
    fn universal_time_rolls_to_previous_day() {
        let birth = BirthData {
            time: NaiveTime::from_hms_opt(0, 30, 0).unwrap(),
            timezone_offset_minutes: 600.0,
            ..birth()
        };
        let ut = birth.universal_time().unwrap();
        assert_eq!(ut.date, NaiveDate::from_ymd_opt(1999, 12, 31).unwrap());
        assert_relative_eq!(ut.hour, 14.5, epsilon = 1e-12);
        assert_relative_eq!(ut.julian_day().value(), birth.julian_day().value(), epsilon = 1e-9);
    }

    #[test]
    fn engine_failure_fails_the_chart() {
        let eph = FixedEphemeris::j2000().failing_body(
            CelestialBody::Jupiter,
            EphemerisError::Computation {
                target: "Jupiter".into(),
                code: -1,
                message: "internal".into(),
            },
        );
        assert!(build_natal_chart(&eph, &birth()).is_err());

        let eph = FixedEphemeris::j2000()
            .failing_houses(EphemerisError::Unavailable("jd beyond range".into()));
        let err = build_natal_chart(&eph, &birth()).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::EngineUnavailable);
    }

    #[test]
    fn angular_distance_wraps() {
        assert_relative_eq!(angular_distance(359.5, 0.5), 1.0, epsilon = 1e-12);
        assert_relative_eq!(angular_distance(10.0, 190.0), 180.0);
    }
}
