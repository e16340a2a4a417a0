//! Port definitions - Interfaces for external dependencies

mod inference_port;

pub use inference_port::{InferencePort, InferenceResult};
