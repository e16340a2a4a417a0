//! Adapters - Implementations of application ports

mod openai_inference_adapter;

pub use openai_inference_adapter::OpenAiInferenceAdapter;
