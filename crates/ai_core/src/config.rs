//! Configuration for inference engine

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the inference engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the OpenAI-compatible API (without trailing `/chat/completions`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Provider API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Model to use
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum tokens to generate (provider default when unset)
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Temperature for sampling; zero keeps the forecast deterministic
    #[serde(default)]
    pub temperature: f32,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

const fn default_timeout_ms() -> u64 {
    60000 // 60 seconds
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            default_model: default_model(),
            timeout_ms: default_timeout_ms(),
            max_tokens: None,
            temperature: 0.0,
        }
    }
}

impl InferenceConfig {
    /// Default configuration with the given API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            ..Default::default()
        }
    }

    /// Whether a non-blank API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = InferenceConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.default_model, "gpt-3.5-turbo");
        assert_eq!(config.timeout_ms, 60000);
        assert!(config.max_tokens.is_none());
        assert!(config.temperature.abs() < f32::EPSILON);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn with_api_key_sets_credential() {
        let config = InferenceConfig::with_api_key("sk-test");
        assert!(config.has_api_key());
        assert_eq!(
            config.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("sk-test".to_string())
        );
    }

    #[test]
    fn blank_api_key_is_not_a_credential() {
        let config = InferenceConfig::with_api_key("   ");
        assert!(!config.has_api_key());
    }

    #[test]
    fn config_serialization_never_contains_key() {
        let config = InferenceConfig::with_api_key("sk-very-secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("base_url"));
        assert!(!json.contains("sk-very-secret"));
        assert!(!json.contains("api_key"));
    }

    #[test]
    fn debug_redacts_key() {
        let config = InferenceConfig::with_api_key("sk-very-secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("InferenceConfig"));
        assert!(!debug.contains("sk-very-secret"));
    }

    #[test]
    fn config_deserialization() {
        let json = r#"{"base_url":"http://custom:8080/v1","default_model":"my-model","api_key":"sk-1"}"#;
        let config: InferenceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "http://custom:8080/v1");
        assert_eq!(config.default_model, "my-model");
        assert!(config.has_api_key());
    }

    #[test]
    fn config_deserialization_with_defaults() {
        let config: InferenceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.timeout_ms, 60000);
        assert!(!config.has_api_key());
    }
}
