//! # BarberHub core
//!
//! Domain types and the availability rules behind appointment booking:
//! weekly opening hours, service selections, time slots and the checks that
//! decide which dates and start times a client may pick.
//!
//! Nothing in this crate performs I/O.

/// Booking-flow errors
pub mod errors;
/// Wire and domain models
pub mod models;
/// Opening-hours index, date gating and slot generation
pub mod availability;
