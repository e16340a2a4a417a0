//! Value Objects - Immutable, identity-less domain primitives

mod day_slot;

pub use day_slot::DaySlot;
