//! Local civil time to Julian day (UT).
//!
//! The Julian day is a continuous day count, so an hour outside [0, 24) after
//! removing the timezone offset simply lands on the neighbouring day instead of
//! needing a clamp.

use std::fmt;

use chrono::{Datelike, Duration as ChronoDuration, NaiveDate, NaiveTime, Timelike};

use crate::error::ChartError;

/// Julian day of 0000-12-31 00:00 UT (proleptic Gregorian), i.e. the day before
/// chrono's `num_days_from_ce() == 1`.
const JD_CE_EPOCH: f64 = 1_721_424.5;

pub const HOURS_PER_DAY: f64 = 24.0;

/// Julian day number in Universal Time.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct JulianDayUt(f64);

impl JulianDayUt {
    pub fn new(value: f64) -> Self {
        JulianDayUt(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for JulianDayUt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.6} UT", self.0)
    }
}

/// A UT calendar date with the hour already rolled into [0, 24).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtInstant {
    pub date: NaiveDate,
    pub hour: f64,
}

impl UtInstant {
    pub fn julian_day(&self) -> JulianDayUt {
        JulianDayUt(julian_day_at_midnight(self.date) + self.hour / HOURS_PER_DAY)
    }
}

/// Julian day at 0h UT of a proleptic Gregorian date.
pub fn julian_day_at_midnight(date: NaiveDate) -> f64 {
    JD_CE_EPOCH + date.num_days_from_ce() as f64
}

/// Clock time as fractional hours.
pub fn decimal_hours(time: NaiveTime) -> f64 {
    time.hour() as f64
        + time.minute() as f64 / 60.0
        + (time.second() as f64 + time.nanosecond() as f64 / 1e9) / 3600.0
}

/// UT hour for a local clock time and an offset in minutes east of UTC. Not
/// reduced to [0, 24).
pub fn ut_hours(time: NaiveTime, offset_minutes: f64) -> f64 {
    decimal_hours(time) - offset_minutes / 60.0
}

pub fn julian_day_ut(date: NaiveDate, time: NaiveTime, offset_minutes: f64) -> JulianDayUt {
    let hour_ut = ut_hours(time, offset_minutes);
    JulianDayUt(julian_day_at_midnight(date) + hour_ut / HOURS_PER_DAY)
}

/// The UT calendar date and hour for a local time, rolling the day boundary.
///
/// Returns `None` when the offset pushes the date outside chrono's range.
pub fn universal_time(date: NaiveDate, time: NaiveTime, offset_minutes: f64) -> Option<UtInstant> {
    let hour_ut = ut_hours(time, offset_minutes);
    let day_shift = (hour_ut / HOURS_PER_DAY).floor();
    let hour = hour_ut - day_shift * HOURS_PER_DAY;
    let date = date.checked_add_signed(ChronoDuration::try_days(day_shift as i64)?)?;

    Some(UtInstant { date, hour })
}

// ---------------------------
// ## Parsing
// ---------------------------

/// Parse `YYYY-MM-DD`.
pub fn parse_date(text: &str) -> Result<NaiveDate, ChartError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|e| ChartError::malformed("date", format!("expected YYYY-MM-DD, got {text:?} ({e})")))
}

/// Parse `HH:MM`, optionally followed by `:SS`.
pub fn parse_time(text: &str) -> Result<NaiveTime, ChartError> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map_err(|e| ChartError::malformed("time", format!("expected HH:MM, got {text:?} ({e})")))
}
