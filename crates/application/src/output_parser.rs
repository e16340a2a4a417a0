//! Output repair and validation
//!
//! Coerces a raw model completion into a validated [`Forecast`]. Local
//! syntax fixes are tried first; if the text still does not satisfy the
//! schema, the model is asked to reformat its own output exactly once.

use domain::{Forecast, ForecastSchema};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError, format_instructions::FormatInstructions, ports::InferencePort,
};

/// Outcome of one parsing pass over a completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The completion satisfied the schema
    Parsed(Forecast),
    /// The completion did not satisfy the schema; a repair round-trip may help
    NeedsRepair { reason: String },
    /// The completion did not satisfy the schema and no repair remains
    Failed { reason: String },
}

impl ParseOutcome {
    /// Convert into a final result, treating any non-parsed outcome as an error
    pub fn into_result(self) -> Result<Forecast, ApplicationError> {
        match self {
            Self::Parsed(forecast) => Ok(forecast),
            Self::NeedsRepair { reason } | Self::Failed { reason } => {
                Err(ApplicationError::MalformedOutput(reason))
            },
        }
    }
}

/// Parser that extracts, repairs, and validates forecast output
#[derive(Debug, Clone)]
pub struct OutputParser {
    schema: ForecastSchema,
    instructions: FormatInstructions,
}

impl OutputParser {
    /// Create a parser, deriving the format instructions from the schema once
    pub fn new(schema: ForecastSchema) -> Self {
        let instructions = FormatInstructions::from_schema(&schema);
        Self {
            schema,
            instructions,
        }
    }

    pub fn format_instructions(&self) -> &FormatInstructions {
        &self.instructions
    }

    /// First pass: parse a completion, reporting whether a repair is worth trying
    pub fn parse(&self, raw: &str) -> ParseOutcome {
        match self.decode(raw) {
            Ok(forecast) => ParseOutcome::Parsed(forecast),
            Err(reason) => ParseOutcome::NeedsRepair { reason },
        }
    }

    /// Final pass: parse a repaired completion; any failure is terminal
    pub fn parse_repaired(&self, raw: &str) -> ParseOutcome {
        match self.decode(raw) {
            Ok(forecast) => ParseOutcome::Parsed(forecast),
            Err(reason) => ParseOutcome::Failed { reason },
        }
    }

    /// Parse a completion, asking the model to fix it at most once
    #[instrument(skip(self, raw, inference), fields(raw_len = raw.len()))]
    pub async fn parse_with_repair(
        &self,
        raw: &str,
        inference: &dyn InferencePort,
    ) -> Result<Forecast, ApplicationError> {
        let reason = match self.parse(raw) {
            ParseOutcome::Parsed(forecast) => return Ok(forecast),
            ParseOutcome::NeedsRepair { reason } => reason,
            failed @ ParseOutcome::Failed { .. } => return failed.into_result(),
        };

        warn!(reason = %reason, "Model output did not match schema, requesting repair");

        let repaired = inference.generate(&self.repair_prompt(raw, &reason)).await?;

        let outcome = self.parse_repaired(&repaired.content);
        if let ParseOutcome::Failed { reason } = &outcome {
            warn!(reason = %reason, "Repaired model output still invalid");
        }
        outcome.into_result()
    }

    /// Prompt asking the model to reformat a non-conforming completion
    pub fn repair_prompt(&self, completion: &str, error: &str) -> String {
        format!(
            "Instructions:\n--------------\n{}\n--------------\n\
             Completion:\n--------------\n{completion}\n--------------\n\n\
             Above, the Completion did not satisfy the constraints given in the Instructions.\n\
             Error:\n--------------\n{error}\n--------------\n\n\
             Please try again. Please only respond with an answer that satisfies the \
             constraints laid out in the Instructions:",
            self.instructions
        )
    }

    /// Extract, decode, and validate a completion
    ///
    /// When the extracted candidate fails, every balanced `{...}` span of the
    /// completion is tried in order, so braces in surrounding prose do not
    /// hide a conforming object.
    fn decode(&self, raw: &str) -> Result<Forecast, String> {
        let candidate = extract_json(raw);
        if candidate.is_empty() {
            return Err("completion is empty".to_string());
        }

        let first = decode_json(candidate)
            .map_err(|e| format!("invalid JSON: {e}"))
            .and_then(|value| self.schema.validate(&value).map_err(|e| e.to_string()));

        let forecast = match first {
            Ok(forecast) => forecast,
            Err(reason) => balanced_objects(raw)
                .filter(|span| *span != candidate)
                .find_map(|span| {
                    let value = serde_json::from_str::<Value>(span).ok()?;
                    self.schema.validate(&value).ok()
                })
                .ok_or(reason)?,
        };

        debug!("Model output matched schema");
        Ok(forecast)
    }
}

impl Default for OutputParser {
    fn default() -> Self {
        Self::new(ForecastSchema::narrative())
    }
}

/// Extract the JSON payload from potentially markdown-wrapped or prose-wrapped text
pub fn extract_json(response: &str) -> &str {
    let response = response.trim();

    if let Some(body) = fenced_body(response) {
        return body;
    }

    // Handle { ... } directly, keeping an unterminated object for syntax repair
    if let Some(start) = response.find('{') {
        return match response.rfind('}') {
            Some(end) if start <= end => &response[start..=end],
            _ => &response[start..],
        };
    }

    response
}

/// Body of the first closed ``` block, skipping a language tag such as `json` or `JSON`
fn fenced_body(text: &str) -> Option<&str> {
    let start = text.find("```")? + 3;
    let rest = &text[start..];
    let tag_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let rest = &rest[tag_len..];
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

/// Balanced `{...}` spans in order of their opening brace
fn balanced_objects(text: &str) -> impl Iterator<Item = &str> {
    text.match_indices('{').filter_map(|(start, _)| {
        matching_brace(&text[start..]).map(|len| &text[start..start + len])
    })
}

/// Byte length of the object opening at the start of `text`, through its closing `}`
fn matching_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut scanner = StringScanner::default();

    for (i, c) in text.char_indices() {
        if !scanner.structural(c) {
            continue;
        }
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            },
            _ => {},
        }
    }

    None
}

/// Decode JSON, falling back to local syntax repairs
///
/// Repairs: trailing commas before a closing bracket, and a missing opening
/// or closing brace around the object body.
fn decode_json(candidate: &str) -> Result<Value, serde_json::Error> {
    match serde_json::from_str(candidate) {
        Ok(value) => Ok(value),
        Err(original) => {
            let patched = patch_syntax(candidate);
            debug!(patched = %patched, "Retrying JSON decode after local repair");
            serde_json::from_str(&patched).map_err(|_| original)
        },
    }
}

fn patch_syntax(candidate: &str) -> String {
    let stripped = strip_trailing_commas(candidate.trim());
    let mut body = stripped.trim_end().trim_end_matches(',').to_string();

    if !body.starts_with('{') {
        body.insert(0, '{');
    }
    let depth = brace_depth(&body);
    for _ in 0..depth {
        body.push('}');
    }
    body
}

/// Tracks whether a character stream is inside a JSON string literal
#[derive(Debug, Default)]
struct StringScanner {
    in_string: bool,
    escaped: bool,
}

impl StringScanner {
    /// Feed one character; true when it sits outside every string literal
    fn structural(&mut self, c: char) -> bool {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == '"' {
                self.in_string = false;
            }
            return false;
        }
        if c == '"' {
            self.in_string = true;
            return false;
        }
        true
    }
}

/// Remove commas that directly precede `}` or `]`, ignoring string contents
fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut scanner = StringScanner::default();

    for (i, &c) in chars.iter().enumerate() {
        if scanner.structural(c) && c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}' | ']')) {
                continue;
            }
        }
        out.push(c);
    }

    out
}

/// Number of unclosed `{` outside of strings
fn brace_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut scanner = StringScanner::default();

    for c in text.chars().filter(|&c| scanner.structural(c)) {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ => {},
        }
    }

    depth
}
