//! API error handling
//!
//! Error bodies carry a fixed message only. Details of internal failures are
//! logged and never returned to the client.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Message returned when the request carries no usable location
pub const MISSING_LOCATION_MESSAGE: &str = "Please provide a location in the request body.";

/// Message returned for every internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{MISSING_LOCATION_MESSAGE}")]
    MissingLocation,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl ApiError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingLocation => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::MissingLocation => MISSING_LOCATION_MESSAGE,
            Self::Internal(detail) => {
                error!(error = %detail, "Request failed");
                INTERNAL_ERROR_MESSAGE
            },
        };

        let body = ErrorResponse {
            error: message.to_string(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn missing_location_message() {
        assert_eq!(
            ApiError::MissingLocation.to_string(),
            "Please provide a location in the request body."
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::MissingLocation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn missing_location_response_body() {
        let (status, body) = body_of(ApiError::MissingLocation).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({"error": "Please provide a location in the request body."})
        );
    }

    #[tokio::test]
    async fn internal_response_hides_detail() {
        let (status, body) =
            body_of(ApiError::Internal("connection refused at 10.0.0.3".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"error": "Internal Server Error"}));
    }

    #[test]
    fn every_application_error_is_internal() {
        let errors = [
            ApplicationError::Inference("unauthorized".into()),
            ApplicationError::ExternalService("timeout".into()),
            ApplicationError::MalformedOutput("no JSON".into()),
            ApplicationError::Configuration("bad template".into()),
        ];
        for err in errors {
            assert!(matches!(ApiError::from(err), ApiError::Internal(_)));
        }
    }
}
