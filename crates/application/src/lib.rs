//! Application layer - Use cases and orchestration
//!
//! Contains the forecast pipeline: format instructions derived from the
//! schema, prompt construction, output repair and validation, and the port
//! through which the model is invoked.

pub mod error;
pub mod format_instructions;
pub mod output_parser;
pub mod ports;
pub mod prompt_template;
pub mod services;

pub use error::ApplicationError;
pub use format_instructions::FormatInstructions;
pub use output_parser::{OutputParser, ParseOutcome};
pub use ports::*;
pub use prompt_template::PromptTemplate;
pub use services::*;
