// Block height endpoints

use axum::{extract::State, http::StatusCode, response::Json};

use crate::errors::ComparerError;
use crate::heights::{ComparisonResult, HealthOutcome};
use crate::web::{AppState, ErrorResponse};

pub type HeightsResult =
    Result<(StatusCode, Json<ComparisonResult>), (StatusCode, Json<ErrorResponse>)>;

pub fn status_for_outcome(outcome: HealthOutcome) -> StatusCode {
    match outcome {
        HealthOutcome::Healthy => StatusCode::OK,
        HealthOutcome::ThresholdExceeded => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Compare the latest block heights of both nodes
///
/// 200 within threshold, 500 past it (same body), 502 when a node fails.
pub async fn get_heights(State(state): State<AppState>) -> HeightsResult {
    match state.comparator.evaluate().await {
        Ok(evaluation) => Ok((
            status_for_outcome(evaluation.outcome),
            Json(evaluation.result),
        )),
        Err(e) => {
            let status = match e {
                ComparerError::Upstream(_) => StatusCode::BAD_GATEWAY,
                ComparerError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((
                status,
                Json(ErrorResponse {
                    error: e.errors().to_string(),
                }),
            ))
        }
    }
}
