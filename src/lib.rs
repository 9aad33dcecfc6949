//! Natal chart computation with whole-sign houses.
//!
//! Raw positions come from an injected [`Ephemeris`]; this crate turns them
//! into signs, degrees and houses and assembles the [`Chart`]. The Swiss
//! Ephemeris binding lives behind the `swisseph` feature.

use std::fmt;

use serde::Serialize;

pub mod chart;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod house;
pub mod http;
#[cfg(feature = "swisseph")]
pub mod swisseph;
pub mod time;
pub mod zodiac;

pub use chart::{build_natal_chart, BirthData, BodyPlacement, Chart, HouseCusp};
pub use config::{ConfigError, EphemerisConfig, ServerConfig};
pub use ephemeris::{Ephemeris, EphemerisError, FixedEphemeris, GeoLocation, HouseCusps, HouseSystem};
pub use error::{ChartError, ErrorKind};
pub use house::{assign_house, House};
pub use time::{julian_day_ut, universal_time, JulianDayUt, UtInstant};
pub use zodiac::{map_sign, normalize_degrees, SignPosition, ZodiacSign};

#[cfg(feature = "swisseph")]
pub use swisseph::SwissEph;

// ---------------------------
// ## Enumerations
// ---------------------------

/// The seven classical bodies. Discriminants are the Swiss Ephemeris body ids.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum CelestialBody {
    Sun = 0,
    Moon = 1,
    Mercury = 2,
    Venus = 3,
    Mars = 4,
    Jupiter = 5,
    Saturn = 6,
}

impl CelestialBody {
    pub fn iter() -> impl Iterator<Item = CelestialBody> {
        [
            CelestialBody::Sun,
            CelestialBody::Moon,
            CelestialBody::Mercury,
            CelestialBody::Venus,
            CelestialBody::Mars,
            CelestialBody::Jupiter,
            CelestialBody::Saturn,
        ]
        .into_iter()
    }

    pub fn name(self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Venus => "Venus",
            CelestialBody::Mars => "Mars",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Saturn => "Saturn",
        }
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
