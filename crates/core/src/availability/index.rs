use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::models::hours::{DayHours, Weekday, WeeklyHours};

/// Opening hours keyed by weekday. A weekday without an entry is closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingHoursIndex {
    days: BTreeMap<Weekday, DayHours>,
}

impl WorkingHoursIndex {
    /// Builds the index from weekly records.
    ///
    /// When a weekday appears more than once the last record wins. Records
    /// that do not open before they close describe no bookable time and are
    /// skipped, leaving the day closed.
    pub fn build<'a, I>(hours: I) -> Self
    where
        I: IntoIterator<Item = &'a WeeklyHours>,
    {
        let mut days = BTreeMap::new();

        for record in hours {
            let day = record.day_hours();
            if !day.is_valid() {
                warn!(
                    "Ignoring opening hours for {}: opens at {} but closes at {}",
                    record.weekday, record.opens_at, record.closes_at
                );
                days.remove(&record.weekday);
                continue;
            }

            days.insert(record.weekday, day);
        }

        Self { days }
    }

    pub fn get(&self, weekday: Weekday) -> Option<&DayHours> {
        self.days.get(&weekday)
    }

    pub fn for_date(&self, date: NaiveDate) -> Option<&DayHours> {
        self.get(date.weekday().into())
    }

    pub fn is_open(&self, weekday: Weekday) -> bool {
        self.days.contains_key(&weekday)
    }

    /// Open weekdays, Sunday first.
    pub fn open_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.days.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl FromIterator<WeeklyHours> for WorkingHoursIndex {
    fn from_iter<I: IntoIterator<Item = WeeklyHours>>(iter: I) -> Self {
        let hours: Vec<WeeklyHours> = iter.into_iter().collect();
        Self::build(&hours)
    }
}

pub fn build_index(hours: &[WeeklyHours]) -> WorkingHoursIndex {
    WorkingHoursIndex::build(hours)
}
