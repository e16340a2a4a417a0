//! Forecast handler

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use domain::Forecast;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{error::ApiError, state::AppState};

/// Forecast request body
#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    /// Free-form location, forwarded to the model verbatim
    #[serde(default)]
    pub location: Option<String>,
}

/// Forecast response body
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    /// Validated five-day forecast
    pub result: Forecast,
}

/// Handle a forecast request
///
/// Any body without a non-blank string `location` is rejected with 400
/// before the model is invoked.
#[instrument(skip(state, payload))]
pub async fn forecast(
    State(state): State<AppState>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> Result<Json<ForecastResponse>, ApiError> {
    let location = match payload {
        Ok(Json(request)) => request.location,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "Unreadable forecast request body");
            None
        },
    };

    let Some(location) = location.filter(|l| !l.trim().is_empty()) else {
        return Err(ApiError::MissingLocation);
    };

    let forecast = state.forecast_service.forecast(&location).await?;

    Ok(Json(ForecastResponse { result: forecast }))
}
