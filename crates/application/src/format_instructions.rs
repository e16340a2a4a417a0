//! Format instructions derived from the forecast schema
//!
//! The instructions tell the model how to encode its answer as text. They are
//! computed once from the schema and embedded verbatim in every prompt.

use std::fmt;

use domain::ForecastSchema;

/// Machine-derived instructions describing the expected output encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatInstructions(String);

impl FormatInstructions {
    /// Render the instructions for a schema
    ///
    /// Pure and deterministic: the same schema always produces the same text.
    pub fn from_schema(schema: &ForecastSchema) -> Self {
        let mut text = String::from(
            "The output should be a markdown code snippet formatted in the following schema, \
             including the leading and trailing \"```json\" and \"```\":\n\n```json\n{\n",
        );

        let last = schema.slots().len().saturating_sub(1);
        for (i, spec) in schema.slots().iter().enumerate() {
            let separator = if i == last { "" } else { "," };
            text.push_str(&format!(
                "\t\"{}\": string{}  // {}\n",
                spec.slot.key(),
                separator,
                spec.description
            ));
        }

        text.push_str(
            "}\n```\n\nEvery key is required and must map to a non-empty string. \
             Do not add any other keys and do not write anything outside the code snippet.",
        );

        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormatInstructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FormatInstructions {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use domain::DaySlot;

    use super::*;

    #[test]
    fn instructions_are_deterministic() {
        let schema = ForecastSchema::narrative();
        let first = FormatInstructions::from_schema(&schema);
        let second = FormatInstructions::from_schema(&schema);
        assert_eq!(first, second);
        assert_eq!(first.as_str(), second.as_str());
    }

    #[test]
    fn instructions_list_every_slot_in_order() {
        let instructions = FormatInstructions::from_schema(&ForecastSchema::narrative());
        let text = instructions.as_str();

        let positions: Vec<usize> = DaySlot::ALL
            .iter()
            .map(|slot| text.find(&format!("\"{}\": string", slot.key())).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn instructions_embed_descriptions() {
        let schema = ForecastSchema::narrative();
        let instructions = FormatInstructions::from_schema(&schema);
        for spec in schema.slots() {
            assert!(instructions.as_str().contains(&spec.description));
        }
    }

    #[test]
    fn instructions_request_fenced_json() {
        let instructions = FormatInstructions::from_schema(&ForecastSchema::narrative());
        assert!(instructions.as_str().contains("```json"));
        assert!(instructions.as_str().contains("Do not add any other keys"));
    }

    #[test]
    fn last_slot_has_no_trailing_comma() {
        let instructions = FormatInstructions::from_schema(&ForecastSchema::narrative());
        assert!(instructions.as_str().contains("\"day4\": string,"));
        assert!(instructions.as_str().contains("\"day5\": string  //"));
    }

    #[test]
    fn different_schemas_give_different_instructions() {
        let custom = ForecastSchema::with_descriptions(|slot| format!("custom {slot}"));
        assert_ne!(
            FormatInstructions::from_schema(&custom),
            FormatInstructions::from_schema(&ForecastSchema::narrative())
        );
    }

    #[test]
    fn display_matches_as_str() {
        let instructions = FormatInstructions::from_schema(&ForecastSchema::narrative());
        assert_eq!(instructions.to_string(), instructions.as_str());
    }
}
