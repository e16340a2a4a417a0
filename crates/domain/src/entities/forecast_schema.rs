//! Forecast schema
//!
//! The canonical shape of a five-day forecast: one narrative string per
//! day-slot. The same schema drives both the instructions handed to the
//! model and the validation of its reply.

use serde_json::Value;

use crate::{entities::Forecast, errors::DomainError, value_objects::DaySlot};

/// A single day-slot together with the description shown to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSpec {
    pub slot: DaySlot,
    pub description: String,
}

/// Schema for the narrative five-day forecast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastSchema {
    slots: [SlotSpec; 5],
}

impl Default for ForecastSchema {
    fn default() -> Self {
        Self::narrative()
    }
}

impl ForecastSchema {
    /// Narrative variant: each day is announcer commentary with a temperature
    pub fn narrative() -> Self {
        Self::with_descriptions(|slot| {
            format!(
                "Day {} weather forecast, narrated by a sports announcer. \
                 Include the expected temperature in degrees Fahrenheit and \
                 use at least two sentences.",
                slot.ordinal_word()
            )
        })
    }

    /// Build a schema with a custom description per slot
    pub fn with_descriptions(describe: impl Fn(DaySlot) -> String) -> Self {
        Self {
            slots: DaySlot::ALL.map(|slot| SlotSpec {
                slot,
                description: describe(slot),
            }),
        }
    }

    /// Slot specifications in calendar order
    pub fn slots(&self) -> &[SlotSpec] {
        &self.slots
    }

    /// Validate a decoded JSON value against the schema
    ///
    /// Every slot must be present and hold a non-blank string. Keys other
    /// than `day1`..`day5` are dropped. Validation is all-or-nothing.
    pub fn validate(&self, value: &Value) -> Result<Forecast, DomainError> {
        let Value::Object(object) = value else {
            return Err(DomainError::NotAnObject(json_kind(value).to_string()));
        };

        let mut days: [String; 5] = Default::default();
        for spec in &self.slots {
            let slot = spec.slot;
            match object.get(slot.key()) {
                None => return Err(DomainError::MissingDaySlot(slot)),
                Some(Value::String(text)) if text.trim().is_empty() => {
                    return Err(DomainError::invalid_slot(slot, "narration is empty"));
                },
                Some(Value::String(text)) => days[slot.index()] = text.clone(),
                Some(other) => {
                    return Err(DomainError::invalid_slot(
                        slot,
                        format!("expected a string, found {}", json_kind(other)),
                    ));
                },
            }
        }

        Forecast::new(days)
    }
}

/// Human-readable name of a JSON value's type
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
