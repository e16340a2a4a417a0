//! Application-level errors

use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Inference/AI error
    #[error("Inference error: {0}")]
    Inference(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Model output could not be coerced into the forecast schema
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}
