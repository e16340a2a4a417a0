//! Forecast service - Location to announcer-style five-day forecast

use std::{fmt, sync::Arc, time::Instant};

use domain::{Forecast, ForecastSchema};
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    format_instructions::FormatInstructions,
    output_parser::OutputParser,
    ports::InferencePort,
    prompt_template::PromptTemplate,
};

/// Service that turns a location into a validated forecast
///
/// Holds no per-request state; one instance is shared by all requests.
pub struct ForecastService {
    inference: Arc<dyn InferencePort>,
    template: PromptTemplate,
    parser: OutputParser,
}

impl fmt::Debug for ForecastService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastService")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl ForecastService {
    /// Create a forecast service with the sports-announcer template and narrative schema
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self {
            inference,
            template: PromptTemplate::sports_announcer(),
            parser: OutputParser::new(ForecastSchema::narrative()),
        }
    }

    /// Replace the prompt template
    #[must_use]
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Instructions embedded in every prompt
    pub fn format_instructions(&self) -> &FormatInstructions {
        self.parser.format_instructions()
    }

    /// Render the prompt for a location
    pub fn build_prompt(&self, location: &str) -> String {
        self.template
            .render(self.parser.format_instructions(), location)
    }

    /// Produce a forecast for a location
    ///
    /// Makes one model call, plus at most one repair call when the first
    /// completion does not satisfy the schema.
    #[instrument(skip(self, location), fields(location_len = location.len()))]
    pub async fn forecast(&self, location: &str) -> Result<Forecast, ApplicationError> {
        let start = Instant::now();

        let prompt = self.build_prompt(location);
        let result = self.inference.generate(&prompt).await?;

        debug!(
            model = %result.model,
            tokens = ?result.tokens_used,
            latency_ms = result.latency_ms,
            "Forecast completion received"
        );

        let forecast = self
            .parser
            .parse_with_repair(&result.content, self.inference.as_ref())
            .await?;

        info!(
            model = %result.model,
            latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Forecast generated"
        );

        Ok(forecast)
    }
}
