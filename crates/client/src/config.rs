//! # Client Configuration Module
//!
//! Loads the settings the booking client needs from environment variables,
//! with defaults where sensible.
//!
//! ## Environment Variables
//!
//! - `BARBERHUB_API_URL`: Base URL of the BarberHub REST backend (required)
//! - `BARBERHUB_API_TOKEN`: Bearer token forwarded on every request
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `BARBERHUB_REQUEST_TIMEOUT_SECONDS`: HTTP request timeout (default: 30)
//! - `BARBERHUB_BOOKING_HORIZON_DAYS`: How far ahead bookings may be placed (default: 30)
//! - `BARBERHUB_SLOT_STEP_MINUTES`: Spacing between candidate start times (default: 30)

use barberhub_core::availability::{BookingPolicy, DEFAULT_HORIZON_DAYS, DEFAULT_STEP_MINUTES};
use eyre::{Result, WrapErr, eyre};
use std::{env, time::Duration};
use tracing::Level;

/// Configuration for the BarberHub booking client
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use barberhub_client::config::ClientConfig;
///
/// fn example() -> Result<()> {
///     let config = ClientConfig::from_env()?;
///     println!("Talking to {}", config.api_base_url);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST backend, without a trailing slash
    pub api_base_url: String,

    /// Bearer token for authenticated endpoints (optional)
    pub api_token: Option<String>,

    /// Log level for the application
    pub log_level: Level,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Booking horizon in days
    pub horizon_days: u32,

    /// Slot granularity in minutes
    pub step_minutes: u32,
}

impl ClientConfig {
    /// Creates a new ClientConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The BARBERHUB_API_URL environment variable is not set
    /// - BARBERHUB_BOOKING_HORIZON_DAYS or BARBERHUB_SLOT_STEP_MINUTES is not a number
    /// - BARBERHUB_SLOT_STEP_MINUTES is zero
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Creates a ClientConfig from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Backend settings
        let api_base_url = lookup("BARBERHUB_API_URL")
            .ok_or_else(|| eyre!("BARBERHUB_API_URL environment variable must be set"))?
            .trim_end_matches('/')
            .to_string();
        let api_token = lookup("BARBERHUB_API_TOKEN").filter(|token| !token.is_empty());

        // Logging settings
        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // Performance settings
        let request_timeout = lookup("BARBERHUB_REQUEST_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);

        // Booking policy
        let horizon_days = match lookup("BARBERHUB_BOOKING_HORIZON_DAYS") {
            Some(value) => value
                .parse()
                .wrap_err("Invalid BARBERHUB_BOOKING_HORIZON_DAYS value")?,
            None => DEFAULT_HORIZON_DAYS,
        };
        let step_minutes: u32 = match lookup("BARBERHUB_SLOT_STEP_MINUTES") {
            Some(value) => value
                .parse()
                .wrap_err("Invalid BARBERHUB_SLOT_STEP_MINUTES value")?,
            None => DEFAULT_STEP_MINUTES,
        };
        if step_minutes == 0 {
            return Err(eyre!("BARBERHUB_SLOT_STEP_MINUTES must be greater than zero"));
        }

        Ok(Self {
            api_base_url,
            api_token,
            log_level,
            request_timeout,
            horizon_days,
            step_minutes,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn booking_policy(&self) -> BookingPolicy {
        BookingPolicy {
            horizon_days: self.horizon_days,
            step_minutes: self.step_minutes,
        }
    }
}
