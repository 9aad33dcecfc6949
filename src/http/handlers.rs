//! HTTP handlers for the REST API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::debug;

use super::dto::{HealthResponse, NatalChartRequest};
use super::error::AppError;
use super::state::AppState;
use crate::chart::{build_natal_chart, Chart};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

pub const LIVENESS_STATUS: &str = "Astrology API is running!";

/// GET /
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: LIVENESS_STATUS.to_string(),
    })
}

/// POST /chart/natal
///
/// The request is fully validated before the ephemeris is consulted; the
/// computation itself runs on the blocking pool since engine calls are
/// synchronous.
pub async fn natal_chart(
    State(state): State<AppState>,
    payload: Result<Json<NatalChartRequest>, JsonRejection>,
) -> HandlerResult<Chart> {
    let Json(request) = payload?;
    let birth = request.into_birth_data()?;
    debug!(date = %birth.date, time = %birth.time, "natal chart requested");

    let engine = state.ephemeris.clone();
    let chart = tokio::task::spawn_blocking(move || build_natal_chart(engine.as_ref(), &birth))
        .await
        .map_err(|e| AppError::Internal(format!("chart task failed: {e}")))??;

    Ok(Json(chart))
}
