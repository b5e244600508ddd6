use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Day of the week used as the key for opening-hours lookups.
///
/// The backend sends upper-case English names; the Portuguese names used by
/// older establishments are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    #[serde(alias = "DOMINGO")]
    Sunday,
    #[serde(alias = "SEGUNDA", alias = "SEGUNDA-FEIRA", alias = "SEGUNDA_FEIRA")]
    Monday,
    #[serde(
        alias = "TERCA",
        alias = "TERÇA",
        alias = "TERCA-FEIRA",
        alias = "TERÇA-FEIRA",
        alias = "TERCA_FEIRA"
    )]
    Tuesday,
    #[serde(alias = "QUARTA", alias = "QUARTA-FEIRA", alias = "QUARTA_FEIRA")]
    Wednesday,
    #[serde(alias = "QUINTA", alias = "QUINTA-FEIRA", alias = "QUINTA_FEIRA")]
    Thursday,
    #[serde(alias = "SEXTA", alias = "SEXTA-FEIRA", alias = "SEXTA_FEIRA")]
    Friday,
    #[serde(alias = "SABADO", alias = "SÁBADO")]
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Sunday => "SUNDAY",
            Weekday::Monday => "MONDAY",
            Weekday::Tuesday => "TUESDAY",
            Weekday::Wednesday => "WEDNESDAY",
            Weekday::Thursday => "THURSDAY",
            Weekday::Friday => "FRIDAY",
            Weekday::Saturday => "SATURDAY",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Sun => Weekday::Sunday,
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opening hours of an establishment for one weekday, as sent by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    #[serde(rename = "diaSemana")]
    pub weekday: Weekday,
    #[serde(rename = "horarioAbertura", with = "time_of_day")]
    pub opens_at: NaiveTime,
    #[serde(rename = "horarioFechamento", with = "time_of_day")]
    pub closes_at: NaiveTime,
}

impl WeeklyHours {
    pub fn new(weekday: Weekday, opens_at: NaiveTime, closes_at: NaiveTime) -> Self {
        Self {
            weekday,
            opens_at,
            closes_at,
        }
    }

    pub fn day_hours(&self) -> DayHours {
        DayHours {
            opens_at: self.opens_at,
            closes_at: self.closes_at,
        }
    }
}

/// Opening and closing time of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    #[serde(with = "time_of_day")]
    pub opens_at: NaiveTime,
    #[serde(with = "time_of_day")]
    pub closes_at: NaiveTime,
}

impl DayHours {
    pub fn opens_minute(&self) -> u32 {
        minutes_since_midnight(self.opens_at)
    }

    pub fn closes_minute(&self) -> u32 {
        minutes_since_midnight(self.closes_at)
    }

    pub fn is_valid(&self) -> bool {
        self.opens_minute() < self.closes_minute()
    }
}

/// Minutes elapsed since midnight; seconds are ignored.
pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Parses `HH:MM`, also accepting the `HH:MM:SS` form some backends emit.
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S").or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
}

/// Serde adapter for `HH:MM` times of day.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_time_of_day(&raw)
            .map_err(|e| serde::de::Error::custom(format!("invalid time of day {raw:?}: {e}")))
    }
}
