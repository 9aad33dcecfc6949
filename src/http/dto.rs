//! Request and response bodies for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::chart::BirthData;
use crate::ephemeris::GeoLocation;
use crate::error::ChartError;
use crate::time::{parse_date, parse_time};

/// A JSON number, or a string holding one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn to_f64(&self, field: &'static str) -> Result<f64, ChartError> {
        let value = match self {
            Numeric::Number(n) => *n,
            Numeric::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ChartError::malformed(field, format!("{s:?} is not a number")))?,
        };
        if !value.is_finite() {
            return Err(ChartError::malformed(field, "must be a finite number"));
        }
        Ok(value)
    }
}

/// Body of `POST /chart/natal`. Every field is required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatalChartRequest {
    pub date: String,
    pub time: String,
    pub lat: Numeric,
    pub lon: Numeric,
    pub timezone_offset_minutes: Numeric,
}

impl NatalChartRequest {
    /// Parse and validate every field without touching the ephemeris.
    pub fn into_birth_data(self) -> Result<BirthData, ChartError> {
        let date = parse_date(&self.date)?;
        let time = parse_time(&self.time)?;

        let latitude = self.lat.to_f64("lat")?;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ChartError::malformed("lat", format!("{latitude} is outside [-90, 90]")));
        }
        let longitude = self.lon.to_f64("lon")?;
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ChartError::malformed("lon", format!("{longitude} is outside [-180, 180]")));
        }
        let timezone_offset_minutes = self.timezone_offset_minutes.to_f64("timezoneOffsetMinutes")?;

        Ok(BirthData {
            date,
            time,
            timezone_offset_minutes,
            location: GeoLocation::new(latitude, longitude),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
