//! Prompt template with format-instruction and input placeholders

use crate::{error::ApplicationError, format_instructions::FormatInstructions};

/// Placeholder replaced by the precomputed format instructions
pub const FORMAT_INSTRUCTIONS_PLACEHOLDER: &str = "{format_instructions}";

/// Placeholder replaced by the caller's text
pub const TEXT_PLACEHOLDER: &str = "{text}";

/// Persona and task description for the forecast announcer
pub const SPORTS_ANNOUNCER_TEMPLATE: &str = "You are a sports announcer explaining the five-day \
weather forecast. If the input provided is unrelated to a city, do not answer.\n\
{format_instructions}\n\
{text}";

/// A prompt template holding exactly one of each placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::sports_announcer()
    }
}

impl PromptTemplate {
    /// Create a template, checking that each placeholder appears exactly once
    /// and that the instructions come before the text
    pub fn new(template: impl Into<String>) -> Result<Self, ApplicationError> {
        let template = template.into();

        for placeholder in [FORMAT_INSTRUCTIONS_PLACEHOLDER, TEXT_PLACEHOLDER] {
            let count = template.matches(placeholder).count();
            if count != 1 {
                return Err(ApplicationError::Configuration(format!(
                    "prompt template must contain {placeholder} exactly once, found {count}"
                )));
            }
        }

        let instructions_at = template.find(FORMAT_INSTRUCTIONS_PLACEHOLDER);
        let text_at = template.find(TEXT_PLACEHOLDER);
        if instructions_at > text_at {
            return Err(ApplicationError::Configuration(format!(
                "{FORMAT_INSTRUCTIONS_PLACEHOLDER} must precede {TEXT_PLACEHOLDER} in the prompt template"
            )));
        }

        Ok(Self { template })
    }

    /// The built-in sports-announcer persona
    pub fn sports_announcer() -> Self {
        Self {
            template: SPORTS_ANNOUNCER_TEMPLATE.to_string(),
        }
    }

    /// Substitute both placeholders
    ///
    /// `text` is inserted verbatim; inserted values are never re-scanned for
    /// placeholders.
    pub fn render(&self, instructions: &FormatInstructions, text: &str) -> String {
        let (head, rest) = self
            .template
            .split_once(FORMAT_INSTRUCTIONS_PLACEHOLDER)
            .unwrap_or((self.template.as_str(), ""));
        let (middle, tail) = rest.split_once(TEXT_PLACEHOLDER).unwrap_or((rest, ""));

        let mut prompt = String::with_capacity(
            self.template.len() + instructions.as_str().len() + text.len(),
        );
        prompt.push_str(head);
        prompt.push_str(instructions.as_str());
        prompt.push_str(middle);
        prompt.push_str(text);
        prompt.push_str(tail);
        prompt
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}
