//! # Booking Backend API
//!
//! The booking flow talks to the BarberHub REST backend through the
//! [`BarberHubApi`] trait. [`HttpApi`] is the `reqwest` implementation used
//! in production; tests substitute [`crate::mock::MockBarberHubApi`].
//!
//! ## Endpoints
//!
//! - `GET  /api/establishments/{id}/working-hours`
//! - `GET  /api/establishments/{id}/services`
//! - `POST /api/appointments`

use async_trait::async_trait;
use barberhub_core::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, ApiErrorResponse, CreateAppointmentRequest, EstablishmentId},
        hours::WeeklyHours,
        service::Service,
    },
};
use eyre::WrapErr;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::config::ClientConfig;

/// Remote collaborator providing establishment data and accepting bookings
#[async_trait]
pub trait BarberHubApi: Send + Sync {
    /// Weekly opening hours of an establishment
    async fn weekly_hours(&self, establishment_id: EstablishmentId) -> BookingResult<Vec<WeeklyHours>>;

    /// Services an establishment offers
    async fn services(&self, establishment_id: EstablishmentId) -> BookingResult<Vec<Service>>;

    /// Submits a booking
    async fn create_appointment(&self, request: &CreateAppointmentRequest) -> BookingResult<Appointment>;
}

/// `reqwest`-backed implementation of [`BarberHubApi`]
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApi {
    /// Creates a client for the backend described by `config`
    ///
    /// The request timeout from the configuration applies to every call.
    pub fn new(config: &ClientConfig) -> BookingResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .wrap_err("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            token: config.api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> BookingResult<T> {
        let response = builder
            .send()
            .await
            .wrap_err("Failed to reach the BarberHub API")?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!("Failed to read error body for {}: {}", status, e);
                    String::new()
                }
            };
            let message = remote_message(status, &body);
            error!("BarberHub API responded with {}: {}", status, message);
            return Err(BookingError::Remote(message));
        }

        let payload = response
            .json::<T>()
            .await
            .wrap_err("Failed to decode BarberHub API response")?;

        Ok(payload)
    }
}

#[async_trait]
impl BarberHubApi for HttpApi {
    async fn weekly_hours(&self, establishment_id: EstablishmentId) -> BookingResult<Vec<WeeklyHours>> {
        let path = format!("/api/establishments/{}/working-hours", establishment_id);
        self.send(self.request(Method::GET, &path)).await
    }

    async fn services(&self, establishment_id: EstablishmentId) -> BookingResult<Vec<Service>> {
        let path = format!("/api/establishments/{}/services", establishment_id);
        self.send(self.request(Method::GET, &path)).await
    }

    async fn create_appointment(&self, request: &CreateAppointmentRequest) -> BookingResult<Appointment> {
        self.send(self.request(Method::POST, "/api/appointments").json(request))
            .await
    }
}

/// Extracts the human-readable message from a failed response
///
/// Prefers the `message` (or `error`) field of a JSON error payload, then the
/// raw body, then the status line.
pub fn remote_message(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorResponse>(body) {
        if !payload.message.trim().is_empty() {
            return payload.message;
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    match status.canonical_reason() {
        Some(reason) => format!("Request failed with status {} {}", status.as_u16(), reason),
        None => format!("Request failed with status {}", status.as_u16()),
    }
}
