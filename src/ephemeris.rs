//! The ephemeris engine seam.
//!
//! The chart layer never computes planetary positions itself. It asks an
//! [`Ephemeris`] for raw ecliptic longitudes and for the ascendant and house
//! cusps, then applies the zodiac and house rules on top. Production code uses
//! the Swiss Ephemeris binding (`swisseph` feature); tests use
//! [`FixedEphemeris`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;

use crate::time::JulianDayUt;
use crate::CelestialBody;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EphemerisError {
    /// The instant is outside the supported span or data files are missing.
    #[error("ephemeris unavailable: {0}")]
    Unavailable(String),
    /// The engine flagged a failure for one body or for the houses query.
    #[error("ephemeris failed computing {target} (code {code}): {message}")]
    Computation {
        target: String,
        code: i32,
        message: String,
    },
}

impl EphemerisError {
    /// Classify a failure reported by the engine as a return code plus message.
    ///
    /// Range and data-file complaints are retryable against a better-provisioned
    /// engine; everything else is a computation failure.
    pub fn from_engine_message(target: impl Into<String>, code: i32, message: &str) -> Self {
        let lowered = message.to_ascii_lowercase();
        let unavailable = ["range", "not found", "cannot open", "file", "beyond", "outside"]
            .iter()
            .any(|needle| lowered.contains(needle));

        if unavailable {
            EphemerisError::Unavailable(message.trim().to_string())
        } else {
            EphemerisError::Computation {
                target: target.into(),
                code,
                message: message.trim().to_string(),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    /// Geographic latitude in degrees, north positive.
    pub latitude: f64,
    /// Geographic longitude in degrees, east positive.
    pub longitude: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoLocation {
            latitude,
            longitude,
        }
    }
}

/// House system identifier passed to the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HouseSystem {
    WholeSign,
}

impl HouseSystem {
    /// Single-letter code understood by the Swiss Ephemeris.
    pub fn code(self) -> u8 {
        match self {
            HouseSystem::WholeSign => b'W',
        }
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HouseSystem::WholeSign => write!(f, "whole sign"),
        }
    }
}

/// Raw engine output for the houses query. Values are not normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseCusps {
    pub ascendant: f64,
    /// Cusp longitudes for houses 1..=12, in that order.
    pub cusps: [f64; 12],
}

pub trait Ephemeris: Send + Sync {
    /// Geocentric ecliptic longitude of `body`. May fall outside [0, 360).
    fn body_longitude(&self, time: JulianDayUt, body: CelestialBody)
        -> Result<f64, EphemerisError>;

    /// Ascendant and cusp longitudes of `system` at `location`.
    fn houses(
        &self,
        time: JulianDayUt,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseCusps, EphemerisError>;
}

// ---------------------------
// ## Fixed Ephemeris
// ---------------------------

/// Deterministic engine returning configured longitudes.
///
/// Unless overridden, cusps are the whole-sign boundaries implied by the
/// ascendant. Every call is counted so tests can assert the engine was or was
/// not consulted.
#[derive(Debug, Default)]
pub struct FixedEphemeris {
    ascendant: f64,
    longitudes: BTreeMap<CelestialBody, f64>,
    cusps: Option<[f64; 12]>,
    body_failures: BTreeMap<CelestialBody, EphemerisError>,
    houses_failure: Option<EphemerisError>,
    calls: AtomicUsize,
}

impl FixedEphemeris {
    pub fn new(ascendant: f64) -> Self {
        FixedEphemeris {
            ascendant,
            ..Default::default()
        }
    }

    /// Positions close to the real sky at 2000-01-01 12:00 UT seen from 0°N 0°E.
    pub fn j2000() -> Self {
        FixedEphemeris::new(11.4)
            .with_body(CelestialBody::Sun, 280.37)
            .with_body(CelestialBody::Moon, 223.32)
            .with_body(CelestialBody::Mercury, 271.89)
            .with_body(CelestialBody::Venus, 241.57)
            .with_body(CelestialBody::Mars, 327.96)
            .with_body(CelestialBody::Jupiter, 25.25)
            .with_body(CelestialBody::Saturn, 40.40)
    }

    pub fn with_body(mut self, body: CelestialBody, longitude: f64) -> Self {
        self.longitudes.insert(body, longitude);
        self
    }

    /// Same longitude for every body.
    pub fn with_all_bodies(mut self, longitude: f64) -> Self {
        for body in CelestialBody::iter() {
            self.longitudes.insert(body, longitude);
        }
        self
    }

    pub fn with_cusps(mut self, cusps: [f64; 12]) -> Self {
        self.cusps = Some(cusps);
        self
    }

    pub fn failing_body(mut self, body: CelestialBody, error: EphemerisError) -> Self {
        self.body_failures.insert(body, error);
        self
    }

    pub fn failing_houses(mut self, error: EphemerisError) -> Self {
        self.houses_failure = Some(error);
        self
    }

    /// Number of engine calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn whole_sign_cusps(&self) -> [f64; 12] {
        let first = self.ascendant.rem_euclid(360.0);
        let first = first - first % 30.0;
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = (first + 30.0 * i as f64) % 360.0;
        }
        cusps
    }
}

impl Ephemeris for FixedEphemeris {
    fn body_longitude(
        &self,
        _time: JulianDayUt,
        body: CelestialBody,
    ) -> Result<f64, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.body_failures.get(&body) {
            return Err(error.clone());
        }
        self.longitudes
            .get(&body)
            .copied()
            .ok_or_else(|| EphemerisError::Computation {
                target: body.name().to_string(),
                code: -1,
                message: "no fixed longitude configured".to_string(),
            })
    }

    fn houses(
        &self,
        _time: JulianDayUt,
        _location: GeoLocation,
        _system: HouseSystem,
    ) -> Result<HouseCusps, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.houses_failure {
            return Err(error.clone());
        }
        Ok(HouseCusps {
            ascendant: self.ascendant,
            cusps: self.cusps.unwrap_or_else(|| self.whole_sign_cusps()),
        })
    }
}
