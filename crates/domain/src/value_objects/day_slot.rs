//! Day-slot value object
//!
//! One of the five named fields (`day1`..`day5`) of a five-day forecast.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::DaySlot;
//!
//! assert_eq!(DaySlot::Day1.key(), "day1");
//! assert_eq!(DaySlot::Day4.ordinal(), 4);
//! assert_eq!(DaySlot::ALL.len(), 5);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A forecast day, `Day1` being the day of the request by convention
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DaySlot {
    Day1,
    Day2,
    Day3,
    Day4,
    Day5,
}

impl DaySlot {
    /// All slots in calendar order
    pub const ALL: [Self; 5] = [Self::Day1, Self::Day2, Self::Day3, Self::Day4, Self::Day5];

    /// JSON key for this slot
    pub const fn key(self) -> &'static str {
        match self {
            Self::Day1 => "day1",
            Self::Day2 => "day2",
            Self::Day3 => "day3",
            Self::Day4 => "day4",
            Self::Day5 => "day5",
        }
    }

    /// 1-based position of the day
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Day1 => 1,
            Self::Day2 => 2,
            Self::Day3 => 3,
            Self::Day4 => 4,
            Self::Day5 => 5,
        }
    }

    /// Zero-based index into a five-element array
    pub const fn index(self) -> usize {
        match self {
            Self::Day1 => 0,
            Self::Day2 => 1,
            Self::Day3 => 2,
            Self::Day4 => 3,
            Self::Day5 => 4,
        }
    }

    /// Spelled-out ordinal, used in field descriptions
    pub const fn ordinal_word(self) -> &'static str {
        match self {
            Self::Day1 => "one",
            Self::Day2 => "two",
            Self::Day3 => "three",
            Self::Day4 => "four",
            Self::Day5 => "five",
        }
    }
}

impl fmt::Display for DaySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_in_calendar_order() {
        let keys: Vec<_> = DaySlot::ALL.iter().map(|s| s.key()).collect();
        assert_eq!(keys, vec!["day1", "day2", "day3", "day4", "day5"]);
    }

    #[test]
    fn ordinals_and_indices_line_up() {
        for (i, slot) in DaySlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
            assert_eq!(usize::from(slot.ordinal()), i + 1);
        }
    }

    #[test]
    fn ordinal_words() {
        assert_eq!(DaySlot::Day1.ordinal_word(), "one");
        assert_eq!(DaySlot::Day5.ordinal_word(), "five");
    }

    #[test]
    fn display_matches_key() {
        assert_eq!(DaySlot::Day3.to_string(), "day3");
    }

    #[test]
    fn serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&DaySlot::Day4).unwrap();
        assert_eq!(json, "\"day4\"");
        let slot: DaySlot = serde_json::from_str("\"day1\"").unwrap();
        assert_eq!(slot, DaySlot::Day1);
    }

    #[test]
    fn slots_are_ordered() {
        assert!(DaySlot::Day1 < DaySlot::Day2);
        assert!(DaySlot::Day4 < DaySlot::Day5);
    }
}
