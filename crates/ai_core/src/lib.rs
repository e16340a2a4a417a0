//! AI Core - Inference engine for text-completion providers
//!
//! Provides the `InferenceEngine` abstraction and an OpenAI-compatible
//! chat-completions client.

pub mod config;
pub mod error;
pub mod openai;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use openai::OpenAiInferenceEngine;
pub use ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};
