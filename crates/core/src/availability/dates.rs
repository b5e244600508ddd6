use chrono::{Days, NaiveDate};

use super::index::WorkingHoursIndex;

/// How many days ahead a booking may be placed by default.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Decides whether `date` can be picked for a booking.
///
/// A date is selectable when it is not before `today`, not more than
/// `horizon_days` after it, and the establishment opens on its weekday.
/// Dates carry no time of day, so "today" is always selectable if open.
pub fn is_date_selectable(
    date: NaiveDate,
    index: &WorkingHoursIndex,
    today: NaiveDate,
    horizon_days: u32,
) -> bool {
    if date < today {
        return false;
    }

    let days_ahead = date.signed_duration_since(today).num_days();
    if days_ahead > i64::from(horizon_days) {
        return false;
    }

    index.for_date(date).is_some()
}

/// Every selectable date from `today` to the end of the horizon, ascending.
pub fn selectable_dates(
    index: &WorkingHoursIndex,
    today: NaiveDate,
    horizon_days: u32,
) -> impl Iterator<Item = NaiveDate> + '_ {
    (0..=u64::from(horizon_days))
        .filter_map(move |offset| today.checked_add_days(Days::new(offset)))
        .filter(move |date| is_date_selectable(*date, index, today, horizon_days))
}
