//! [`Ephemeris`] backed by the Swiss Ephemeris C library.
//!
//! The library keeps its data path and file handles in global state, so the
//! path is set exactly once per process and every call is serialized through
//! one process-wide lock.

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_double, c_int};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

use tracing::{debug, info, warn};

use crate::config::EphemerisConfig;
use crate::ephemeris::{Ephemeris, EphemerisError, GeoLocation, HouseCusps, HouseSystem};
use crate::time::JulianDayUt;
use crate::CelestialBody;

// ---------------------------
// ## FFI Bindings for Swiss Ephemeris
// ---------------------------

mod bindings {
    use super::*;

    extern "C" {
        pub fn swe_set_ephe_path(path: *const c_char);

        pub fn swe_calc_ut(
            tjd_ut: c_double,
            ipl: c_int,
            iflag: c_int,
            xx: *mut c_double,
            serr: *mut c_char,
        ) -> c_int;

        pub fn swe_houses_ex(
            tjd_ut: c_double,
            iflag: c_int,
            geolat: c_double,
            geolon: c_double,
            hsys: c_int,
            cusps: *mut c_double,
            ascmc: *mut c_double,
        ) -> c_int;
    }
}

use bindings::*;

// ---------------------------
// ## Constants for Swiss Ephemeris
// ---------------------------

const AS_MAXCH: usize = 256;
const ERR: c_int = -1;

const SEFLG_SWIEPH: c_int = 2;

const SE_ASC: usize = 0;

/// Path handed to `swe_set_ephe_path`; set once for the whole process.
static EPHE_PATH: OnceLock<PathBuf> = OnceLock::new();
static ENGINE_LOCK: Mutex<()> = Mutex::new(());

// ---------------------------
// ## SwissEph Structure
// ---------------------------

/// Swiss Ephemeris engine. Cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct SwissEph {
    require_data_files: bool,
}

impl SwissEph {
    /// Point the library at `config.ephe_path`.
    ///
    /// The first successful call fixes the path for the process; later calls
    /// must name the same directory.
    pub fn new(config: &EphemerisConfig) -> Result<Self, EphemerisError> {
        config
            .validate()
            .map_err(|e| EphemerisError::Unavailable(e.to_string()))?;

        let requested = config.ephe_path.clone();
        let active = EPHE_PATH.get_or_init(|| {
            let _guard = lock();
            match CString::new(requested.to_string_lossy().into_owned()) {
                Ok(c_path) => unsafe { swe_set_ephe_path(c_path.as_ptr()) },
                Err(_) => warn!(path = %requested.display(), "ephemeris path contains NUL; using library default"),
            }
            info!(path = %requested.display(), "Swiss Ephemeris path set");
            requested.clone()
        });

        if *active != config.ephe_path {
            return Err(EphemerisError::Unavailable(format!(
                "Swiss Ephemeris already configured with {}, cannot switch to {}",
                active.display(),
                config.ephe_path.display()
            )));
        }

        Ok(SwissEph {
            require_data_files: config.require_data_files,
        })
    }
}

fn lock() -> MutexGuard<'static, ()> {
    // A panic while holding the lock leaves no Rust state behind to repair.
    ENGINE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn message_from(buffer: &[c_char; AS_MAXCH]) -> String {
    unsafe { CStr::from_ptr(buffer.as_ptr()) }
        .to_string_lossy()
        .trim()
        .to_string()
}

impl Ephemeris for SwissEph {
    fn body_longitude(
        &self,
        time: JulianDayUt,
        body: CelestialBody,
    ) -> Result<f64, EphemerisError> {
        let mut results: [c_double; 6] = [0.0; 6];
        let mut error: [c_char; AS_MAXCH] = [0; AS_MAXCH];

        let returned_flags = {
            let _guard = lock();
            unsafe {
                swe_calc_ut(
                    time.value(),
                    body as c_int,
                    SEFLG_SWIEPH,
                    results.as_mut_ptr(),
                    error.as_mut_ptr(),
                )
            }
        };

        if returned_flags == ERR {
            let message = message_from(&error);
            warn!(%body, %time, %message, "swe_calc_ut failed");
            return Err(EphemerisError::from_engine_message(body.name(), returned_flags, &message));
        }

        if returned_flags & SEFLG_SWIEPH == 0 {
            let message = message_from(&error);
            if self.require_data_files {
                return Err(EphemerisError::Unavailable(format!(
                    "Swiss Ephemeris data files unavailable for {body}: {message}"
                )));
            }
            debug!(%body, %message, "fell back to the Moshier ephemeris");
        }

        Ok(results[0])
    }

    fn houses(
        &self,
        time: JulianDayUt,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseCusps, EphemerisError> {
        let mut cusps: [c_double; 13] = [0.0; 13];
        let mut ascmc: [c_double; 10] = [0.0; 10];

        let code = {
            let _guard = lock();
            unsafe {
                swe_houses_ex(
                    time.value(),
                    0,
                    location.latitude,
                    location.longitude,
                    system.code() as c_int,
                    cusps.as_mut_ptr(),
                    ascmc.as_mut_ptr(),
                )
            }
        };

        if code == ERR {
            warn!(%time, %system, latitude = location.latitude, "swe_houses_ex failed");
            return Err(EphemerisError::Computation {
                target: format!("{system} houses"),
                code,
                message: "Error calculating houses".to_string(),
            });
        }

        let mut house_cusps = [0.0; 12];
        house_cusps.copy_from_slice(&cusps[1..=12]);

        Ok(HouseCusps {
            ascendant: ascmc[SE_ASC],
            cusps: house_cusps,
        })
    }
}
