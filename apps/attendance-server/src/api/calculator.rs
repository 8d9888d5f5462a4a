//! Stateless attendance calculator.

use axum::Json;
use projection::{AttendanceSummary, CalculatorQuery};

use super::ApiJson;
use crate::error::ServerResult;

/// Solves a calculator query and returns the full summary. Nothing is stored.
pub async fn calculate(
    ApiJson(query): ApiJson<CalculatorQuery>,
) -> ServerResult<Json<AttendanceSummary>> {
    let tally = projection::solve(query)?;
    Ok(Json(tally.summary()))
}
