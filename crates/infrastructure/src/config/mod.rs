//! Application configuration
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. Optional `config.toml` (or any format the `config` crate recognises)
//! 3. `WEATHERCAST__SECTION__KEY` environment variables
//! 4. The plain `OPENAI_API_KEY` and `PORT` variables

mod server;

use std::collections::HashMap;

use ai_core::InferenceConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use server::ServerConfig;

/// Prefix for structured environment overrides
pub const ENV_PREFIX: &str = "WEATHERCAST";

/// Plain variable holding the provider API key
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Plain variable holding the listen port
pub const PORT_VAR: &str = "PORT";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// No usable API key was configured
    #[error("Missing credential: set {API_KEY_VAR} to a non-empty value")]
    MissingCredential,
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Model provider configuration
    #[serde(default)]
    pub inference: InferenceConfig,
}

impl AppConfig {
    /// Load configuration from the process environment and `./config.*`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config", std::env::vars().collect())
    }

    /// Load configuration from a named file (extension optional) and an
    /// explicit set of environment variables
    pub fn load_from(file: &str, env: HashMap<String, String>) -> Result<Self, ConfigError> {
        let api_key = env.get(API_KEY_VAR).cloned();
        let port = env.get(PORT_VAR).cloned();

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3001)?
            .set_default("inference.base_url", "https://api.openai.com/v1")?
            .set_default("inference.default_model", "gpt-3.5-turbo")?
            // Load from file if exists
            .add_source(config::File::with_name(file).required(false))
            // Override with environment variables (e.g., WEATHERCAST__SERVER__HOST)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env)),
            )
            .set_override_option("inference.api_key", api_key)?
            .set_override_option("server.port", port)?;

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Check that the configuration can serve requests
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.inference.has_api_key() {
            return Err(ConfigError::MissingCredential);
        }
        Ok(())
    }
}
