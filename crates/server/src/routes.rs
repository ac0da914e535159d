//! API route handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use forecast_facade::{ErrorClass, Forecast, ForecastError, ForecastRequest};

use crate::AppState;

/// Wire shape of every failure response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A classified failure ready to be rendered as a response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }
}

impl From<ForecastError> for ApiError {
    fn from(error: ForecastError) -> Self {
        let status = match error.class() {
            ErrorClass::Validation => StatusCode::BAD_REQUEST,
            ErrorClass::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(%error, "forecast request failed");
        }
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

/// POST /api/v1/forecast
///
/// Scoring is synchronous and CPU-bound, so it runs on the blocking pool
/// under a bounded timeout; a stalled model call cannot pin a worker.
pub async fn forecast(
    State(state): State<AppState>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> Result<Json<Forecast>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let service = state
        .service
        .clone()
        .ok_or(ForecastError::PredictorUnavailable)?;

    let timeout = state.predict_timeout;
    let scored = tokio::time::timeout(
        timeout,
        tokio::task::spawn_blocking(move || service.predict(&request)),
    )
    .await;

    match scored {
        Err(_) => Err(ForecastError::PredictionFailed(format!(
            "scoring exceeded {} ms",
            timeout.as_millis()
        ))
        .into()),
        Ok(Err(join_error)) => {
            Err(ForecastError::PredictionFailed(format!("scoring task failed: {join_error}")).into())
        }
        Ok(Ok(result)) => Ok(Json(result?)),
    }
}
