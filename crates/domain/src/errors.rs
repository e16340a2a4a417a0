//! Domain-level errors

use thiserror::Error;

use crate::value_objects::DaySlot;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The forecast payload was not a JSON object
    #[error("Forecast must be a JSON object, found {0}")]
    NotAnObject(String),

    /// A required day-slot was absent
    #[error("Missing day slot: {0}")]
    MissingDaySlot(DaySlot),

    /// A day-slot was present but did not satisfy its field rules
    #[error("Invalid day slot {slot}: {reason}")]
    InvalidDaySlot { slot: DaySlot, reason: String },
}

impl DomainError {
    /// Create an invalid day-slot error
    pub fn invalid_slot(slot: DaySlot, reason: impl Into<String>) -> Self {
        Self::InvalidDaySlot {
            slot,
            reason: reason.into(),
        }
    }
}
