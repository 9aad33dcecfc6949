//! axum HTTP boundary: request parsing, JSON responses, error mapping.
//!
//! Holds no chart rules; handlers validate input and hand a [`BirthData`]
//! to [`build_natal_chart`].
//!
//! [`BirthData`]: crate::chart::BirthData
//! [`build_natal_chart`]: crate::chart::build_natal_chart

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
