//! Availability computation for the booking flow.
//!
//! - [`index`]: weekly opening hours keyed by weekday
//! - [`dates`]: which calendar dates can be booked
//! - [`slots`]: which start times fit a service selection on a given day
//!
//! Everything here is pure and cheap enough to call once per rendered
//! calendar cell.

pub mod dates;
pub mod index;
pub mod slots;

pub use dates::{DEFAULT_HORIZON_DAYS, is_date_selectable, selectable_dates};
pub use index::{WorkingHoursIndex, build_index};
pub use slots::{DEFAULT_STEP_MINUTES, generate_slots, slots_for_date};

/// Booking horizon and slot granularity applied by a booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    /// Maximum number of days ahead of today a booking may be placed
    pub horizon_days: u32,
    /// Minutes between consecutive candidate start times
    pub step_minutes: u32,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            step_minutes: DEFAULT_STEP_MINUTES,
        }
    }
}
