//! # BarberHub Client
//!
//! Client side of appointment booking: configuration, the REST backend
//! client and the booking form that ties availability rules to user input.
//!
//! ## Architecture
//!
//! - **Config**: environment-driven settings for the backend and booking policy
//! - **Api**: the [`api::BarberHubApi`] trait and its `reqwest` implementation
//! - **Mock**: a `mockall` double of the API for tests
//! - **Form**: the [`form::BookingForm`] controller

/// Configuration loaded from the environment
pub mod config;
/// REST backend client
pub mod api;
/// Mock backend for testing
pub mod mock;
/// Booking form controller
pub mod form;

pub use api::{BarberHubApi, HttpApi};
pub use config::ClientConfig;
pub use form::BookingForm;
