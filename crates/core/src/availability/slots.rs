use chrono::NaiveDate;

use super::index::WorkingHoursIndex;
use crate::models::{hours::DayHours, time_slot::TimeSlot};

/// Spacing between consecutive start times, in minutes.
pub const DEFAULT_STEP_MINUTES: u32 = 30;

/// Lists the start times at which a service of `total_duration_minutes` fits
/// entirely within `day_hours`.
///
/// Start times begin at opening and advance by `step_minutes`. A start time
/// is kept while `start + duration <= close`, so an appointment ending exactly
/// at closing time is bookable. Closed days, an empty service selection and a
/// zero step all produce no slots. Durations or steps too large to add stop
/// the walk instead of wrapping.
pub fn generate_slots(
    day_hours: Option<&DayHours>,
    total_duration_minutes: u32,
    step_minutes: u32,
) -> Vec<TimeSlot> {
    let Some(hours) = day_hours else {
        return Vec::new();
    };
    if total_duration_minutes == 0 || step_minutes == 0 {
        return Vec::new();
    }

    let open = hours.opens_minute();
    let close = hours.closes_minute();

    let mut slots = Vec::new();
    let mut start = open;
    while let Some(end) = start.checked_add(total_duration_minutes) {
        if end > close {
            break;
        }
        if let Some(slot) = TimeSlot::from_minutes(start) {
            slots.push(slot);
        }
        match start.checked_add(step_minutes) {
            Some(next) => start = next,
            None => break,
        }
    }

    slots
}

/// Start times available on `date` according to the establishment's hours.
pub fn slots_for_date(
    index: &WorkingHoursIndex,
    date: NaiveDate,
    total_duration_minutes: u32,
    step_minutes: u32,
) -> Vec<TimeSlot> {
    generate_slots(index.for_date(date), total_duration_minutes, step_minutes)
}
