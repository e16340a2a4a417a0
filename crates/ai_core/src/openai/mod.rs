//! OpenAI-compatible inference engine
//!
//! Talks to any server exposing the `/chat/completions` endpoint.

mod client;

pub use client::OpenAiInferenceEngine;
