//! Validated five-day forecast

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{errors::DomainError, value_objects::DaySlot};

/// A five-day forecast whose every slot holds non-empty narration
///
/// Only obtainable through [`Forecast::new`] or
/// [`ForecastSchema::validate`](crate::ForecastSchema::validate), so a value
/// of this type is never partially filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forecast {
    days: [String; 5],
}

impl Forecast {
    /// Build a forecast from narrations in `day1`..`day5` order
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDaySlot` for the first blank narration.
    pub fn new<S: Into<String>>(days: [S; 5]) -> Result<Self, DomainError> {
        let days = days.map(Into::into);
        for slot in DaySlot::ALL {
            if days[slot.index()].trim().is_empty() {
                return Err(DomainError::invalid_slot(slot, "narration is empty"));
            }
        }
        Ok(Self { days })
    }

    /// Narration for one day
    pub fn day(&self, slot: DaySlot) -> &str {
        &self.days[slot.index()]
    }

    /// Iterate over `(slot, narration)` pairs in calendar order
    pub fn iter(&self) -> impl Iterator<Item = (DaySlot, &str)> {
        DaySlot::ALL
            .into_iter()
            .map(move |slot| (slot, self.day(slot)))
    }
}

impl Serialize for Forecast {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(DaySlot::ALL.len()))?;
        for (slot, narration) in self.iter() {
            map.serialize_entry(slot.key(), narration)?;
        }
        map.end()
    }
}
