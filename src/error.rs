use thiserror::Error;

use crate::ephemeris::EphemerisError;

// ---------------------------
// ## Error Handling
// ---------------------------

/// Coarse classification a caller uses to tell "fix your request" apart from
/// "try again later".
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedInput,
    EngineUnavailable,
    EngineFailure,
    Internal,
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("malformed input: {field}: {reason}")]
    MalformedInput { field: &'static str, reason: String },

    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),

    #[error("engine cusp for house {house} is {cusp_longitude}, expected the {expected} boundary at {expected_longitude}")]
    InconsistentCusps {
        house: u8,
        cusp_longitude: f64,
        expected: crate::zodiac::ZodiacSign,
        expected_longitude: f64,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ChartError {
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        ChartError::MalformedInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ChartError::MalformedInput { .. } => ErrorKind::MalformedInput,
            ChartError::Ephemeris(EphemerisError::Unavailable(_)) => ErrorKind::EngineUnavailable,
            ChartError::Ephemeris(EphemerisError::Computation { .. }) => ErrorKind::EngineFailure,
            ChartError::InconsistentCusps { .. } => ErrorKind::EngineFailure,
            ChartError::Internal(_) => ErrorKind::Internal,
        }
    }
}
