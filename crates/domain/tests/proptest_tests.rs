//! Property-based tests for the forecast schema
//!
//! These tests use proptest to verify validation invariants across many random inputs.

use domain::{DaySlot, DomainError, ForecastSchema};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn narration() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 .,!]{0,80}"
}

fn payload(days: &[String]) -> Value {
    let mut object = Map::new();
    for (slot, text) in DaySlot::ALL.iter().zip(days) {
        object.insert(slot.key().to_string(), Value::String(text.clone()));
    }
    Value::Object(object)
}

proptest! {
    #[test]
    fn any_five_non_blank_strings_validate(days in prop::collection::vec(narration(), 5)) {
        let forecast = ForecastSchema::narrative().validate(&payload(&days));
        prop_assert!(forecast.is_ok());

        let forecast = forecast.unwrap();
        for slot in DaySlot::ALL {
            prop_assert_eq!(forecast.day(slot), days[slot.index()].as_str());
        }
    }

    #[test]
    fn removing_any_slot_fails(
        days in prop::collection::vec(narration(), 5),
        missing in 0usize..5,
    ) {
        let mut value = payload(&days);
        let slot = DaySlot::ALL[missing];
        value.as_object_mut().map(|o| o.remove(slot.key()));

        let err = ForecastSchema::narrative().validate(&value);
        prop_assert_eq!(err, Err(DomainError::MissingDaySlot(slot)));
    }

    #[test]
    fn numeric_slot_fails(
        days in prop::collection::vec(narration(), 5),
        which in 0usize..5,
        temperature in -40i64..130,
    ) {
        let mut value = payload(&days);
        let slot = DaySlot::ALL[which];
        value[slot.key()] = Value::from(temperature);

        let err = ForecastSchema::narrative().validate(&value);
        prop_assert_eq!(
            err,
            Err(DomainError::invalid_slot(slot, "expected a string, found number"))
        );
    }

    #[test]
    fn whitespace_only_slot_fails(
        days in prop::collection::vec(narration(), 5),
        which in 0usize..5,
        blank in "[ \t\n]{0,8}",
    ) {
        let mut value = payload(&days);
        let slot = DaySlot::ALL[which];
        value[slot.key()] = Value::String(blank);

        let err = ForecastSchema::narrative().validate(&value);
        prop_assert_eq!(err, Err(DomainError::invalid_slot(slot, "narration is empty")));
    }

    #[test]
    fn unknown_keys_are_dropped(
        days in prop::collection::vec(narration(), 5),
        extra in "[a-z_]{1,12}",
        text in narration(),
    ) {
        let mut value = payload(&days);
        if let Some(object) = value.as_object_mut() {
            object.entry(extra).or_insert(Value::String(text));
        }

        let forecast = ForecastSchema::narrative().validate(&value).unwrap();
        prop_assert_eq!(serde_json::to_value(&forecast).unwrap(), payload(&days));
    }

    #[test]
    fn serialization_preserves_every_slot(days in prop::collection::vec(narration(), 5)) {
        let forecast = ForecastSchema::narrative().validate(&payload(&days)).unwrap();
        let round_trip = serde_json::to_value(&forecast).unwrap();
        prop_assert_eq!(round_trip, payload(&days));
    }
}
