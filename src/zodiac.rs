use std::fmt;

use serde::Serialize;

// ---------------------------
// ## Zodiac Signs
// ---------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ZodiacSign {
    Aries = 0,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in ecliptic order, indexed by `ZodiacSign::index`.
pub const ALL_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

/// Width of one sign on the ecliptic, in degrees.
pub const SIGN_SPAN_DEG: f64 = 30.0;

impl ZodiacSign {
    pub fn from_longitude(longitude: f64) -> Self {
        map_sign(longitude).sign
    }

    /// Sign for a 0-based index; wraps modulo 12.
    pub fn from_index(index: usize) -> Self {
        ALL_SIGNS[index % 12]
    }

    /// 0-based index (Aries = 0 .. Pisces = 11).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    /// Ecliptic longitude at which the sign begins.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * SIGN_SPAN_DEG
    }

    pub fn all() -> &'static [ZodiacSign; 12] {
        &ALL_SIGNS
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------
// ## Sign Positions
// ---------------------------

/// A longitude decomposed into its sign and the offset inside that sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignPosition {
    /// Normalized ecliptic longitude in [0, 360).
    pub longitude: f64,
    pub sign: ZodiacSign,
    /// Degrees past the start of `sign`, in [0, 30).
    pub degree_in_sign: f64,
}

impl SignPosition {
    pub fn from_longitude(longitude: f64) -> Self {
        map_sign(longitude)
    }
}

/// Wrap a longitude into [0, 360).
///
/// `rem_euclid` can round a tiny negative input up to exactly 360.0, which is
/// folded back onto 0.0.
pub fn normalize_degrees(longitude: f64) -> f64 {
    let wrapped = longitude.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Map an ecliptic longitude to its sign and degree-in-sign.
///
/// The sign index is derived from the remainder rather than from a separate
/// `floor(lon / 30)`, so `sign.start_longitude() + degree_in_sign` always
/// reproduces the normalized longitude even right below a sign boundary.
pub fn map_sign(longitude: f64) -> SignPosition {
    let normalized = normalize_degrees(longitude);
    let degree_in_sign = normalized % SIGN_SPAN_DEG;
    let sign_index = ((normalized - degree_in_sign) / SIGN_SPAN_DEG).round() as usize;

    SignPosition {
        longitude: normalized,
        sign: ZodiacSign::from_index(sign_index),
        degree_in_sign,
    }
}
