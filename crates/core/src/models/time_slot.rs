use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{errors::BookingError, models::hours::minutes_since_midnight};

/// Candidate appointment start time, rendered as zero-padded `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot {
    minute_of_day: u32,
}

impl TimeSlot {
    pub const MINUTES_PER_DAY: u32 = 24 * 60;

    /// Builds a slot from minutes since midnight. Returns `None` past 23:59.
    pub fn from_minutes(minute_of_day: u32) -> Option<Self> {
        (minute_of_day < Self::MINUTES_PER_DAY).then_some(Self { minute_of_day })
    }

    pub fn minute_of_day(&self) -> u32 {
        self.minute_of_day
    }

    pub fn hour(&self) -> u32 {
        self.minute_of_day / 60
    }

    pub fn minute(&self) -> u32 {
        self.minute_of_day % 60
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // minute_of_day < 1440 always holds, so this never falls back
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }

    /// Local wall-clock timestamp of this slot on `date`.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.to_naive_time())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeSlot {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map_err(|e| BookingError::Validation(format!("Invalid time {s:?}, expected HH:MM: {e}")))?;

        Ok(Self {
            minute_of_day: minutes_since_midnight(time),
        })
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
