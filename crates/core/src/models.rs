pub mod appointment;
pub mod hours;
pub mod service;
pub mod time_slot;
