//! Inference port - Interface for LLM inference

use async_trait::async_trait;

use crate::error::ApplicationError;

/// Result of an inference call
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// Generated response content, untrusted and possibly empty
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Number of tokens used (if available)
    pub tokens_used: Option<u32>,
    /// Latency in milliseconds
    pub latency_ms: u64,
}

/// Port for inference operations
///
/// The only outbound network dependency of the forecast pipeline.
/// Implementations perform no retries.
#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Send a prompt and return the raw completion
    async fn generate(&self, prompt: &str) -> Result<InferenceResult, ApplicationError>;

    /// Get the name of the current model
    fn current_model(&self) -> String;
}
