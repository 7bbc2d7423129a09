use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Day-of-week codes as they appear in schedules, booking rows and URLs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
            Weekday::Sat => "sat",
            Weekday::Sun => "sun",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.code() == code)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// State of a single (weekday, time) slot.
///
/// A pair that is not a key in the schedule is `Unknown`, which is a
/// different condition from a pair that is present but already booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Free,
    Taken,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("slot is already booked")]
    AlreadyTaken,
    #[error("no such slot in the schedule")]
    Unknown,
}

/// A tutor's weekly availability: weekday -> time (HH:MM) -> free flag.
///
/// Serialized as-is into the `schedule` JSON column on tutors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule(BTreeMap<Weekday, BTreeMap<String, bool>>);

impl Schedule {
    pub fn slot_status(&self, weekday: Weekday, time: &str) -> SlotStatus {
        match self.0.get(&weekday).and_then(|times| times.get(time)) {
            Some(true) => SlotStatus::Free,
            Some(false) => SlotStatus::Taken,
            None => SlotStatus::Unknown,
        }
    }

    /// Flips a free slot to taken. The schedule is left untouched unless
    /// the slot exists and is currently free.
    pub fn reserve(&mut self, weekday: Weekday, time: &str) -> Result<(), SlotError> {
        match self.0.get_mut(&weekday).and_then(|times| times.get_mut(time)) {
            Some(free) if *free => {
                *free = false;
                Ok(())
            }
            Some(_) => Err(SlotError::AlreadyTaken),
            None => Err(SlotError::Unknown),
        }
    }
}
