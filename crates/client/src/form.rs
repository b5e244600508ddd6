//! # Booking Form
//!
//! State behind the appointment scheduling screen. The form owns the user's
//! choices (services, date, time) and keeps the list of available start times
//! derived from them and from the establishment's opening hours.
//!
//! Every change to the date or to the service selection clears the chosen
//! time in the same step that recomputes the available times, so the form
//! never holds a time that was picked against different inputs.

use barberhub_core::{
    availability::{BookingPolicy, WorkingHoursIndex, is_date_selectable, selectable_dates, slots_for_date},
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, ClientId, CreateAppointmentRequest, EstablishmentId},
        hours::WeeklyHours,
        service::{Service, ServiceId, ServiceSelection},
        time_slot::TimeSlot,
    },
};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, error, info};

use crate::api::BarberHubApi;

#[derive(Debug, Clone)]
pub struct BookingForm {
    client_id: ClientId,
    establishment_id: EstablishmentId,
    policy: BookingPolicy,
    index: WorkingHoursIndex,
    catalog: Vec<Service>,
    services: ServiceSelection,
    date: Option<NaiveDate>,
    time: Option<TimeSlot>,
    available_times: Vec<TimeSlot>,
}

impl BookingForm {
    pub fn new(
        client_id: ClientId,
        establishment_id: EstablishmentId,
        hours: &[WeeklyHours],
        catalog: Vec<Service>,
    ) -> Self {
        Self {
            client_id,
            establishment_id,
            policy: BookingPolicy::default(),
            index: WorkingHoursIndex::build(hours),
            catalog,
            services: ServiceSelection::new(),
            date: None,
            time: None,
            available_times: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: BookingPolicy) -> Self {
        self.policy = policy;
        self.recompute();
        self
    }

    /// Fetches the establishment's hours and services and builds an empty form.
    pub async fn load<A>(api: &A, client_id: ClientId, establishment_id: EstablishmentId) -> BookingResult<Self>
    where
        A: BarberHubApi + ?Sized,
    {
        let hours = api.weekly_hours(establishment_id).await?;
        let catalog = api.services(establishment_id).await?;
        debug!(
            "Loaded {} opening-hour records and {} services for establishment {}",
            hours.len(),
            catalog.len(),
            establishment_id
        );

        Ok(Self::new(client_id, establishment_id, &hours, catalog))
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn establishment_id(&self) -> EstablishmentId {
        self.establishment_id
    }

    pub fn policy(&self) -> BookingPolicy {
        self.policy
    }

    pub fn working_hours(&self) -> &WorkingHoursIndex {
        &self.index
    }

    pub fn catalog(&self) -> &[Service] {
        &self.catalog
    }

    pub fn selected_services(&self) -> &ServiceSelection {
        &self.services
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn selected_time(&self) -> Option<TimeSlot> {
        self.time
    }

    /// Start times bookable for the current date and service selection.
    pub fn available_times(&self) -> &[TimeSlot] {
        &self.available_times
    }

    pub fn total_duration_minutes(&self) -> u32 {
        self.services.total_duration_minutes()
    }

    pub fn total_price(&self) -> f64 {
        self.services.total_price()
    }

    pub fn is_date_selectable(&self, date: NaiveDate, today: NaiveDate) -> bool {
        is_date_selectable(date, &self.index, today, self.policy.horizon_days)
    }

    pub fn selectable_dates(&self, today: NaiveDate) -> Vec<NaiveDate> {
        selectable_dates(&self.index, today, self.policy.horizon_days).collect()
    }

    /// Replaces the opening hours. The chosen time is kept; submission checks
    /// it against the recomputed slots.
    pub fn set_weekly_hours(&mut self, hours: &[WeeklyHours]) {
        self.index = WorkingHoursIndex::build(hours);
        self.recompute();
    }

    pub fn select_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
        self.time = None;
        self.recompute();
    }

    /// Adds the service if absent, removes it otherwise. Returns whether it
    /// is selected afterwards.
    pub fn toggle_service(&mut self, id: ServiceId) -> BookingResult<bool> {
        let selected = if self.services.remove(id) {
            false
        } else {
            let service = self.find_service(id)?.clone();
            self.services.insert(service);
            true
        };

        self.time = None;
        self.recompute();
        Ok(selected)
    }

    /// Replaces the selection with `ids`, in order. Nothing changes if any id
    /// is unknown.
    pub fn set_services(&mut self, ids: &[ServiceId]) -> BookingResult<()> {
        let selection = ids
            .iter()
            .map(|id| self.find_service(*id).cloned())
            .collect::<BookingResult<ServiceSelection>>()?;

        self.services = selection;
        self.time = None;
        self.recompute();
        Ok(())
    }

    pub fn clear_services(&mut self) {
        self.services.clear();
        self.time = None;
        self.recompute();
    }

    pub fn select_time(&mut self, time: TimeSlot) {
        self.time = Some(time);
    }

    pub fn clear_time(&mut self) {
        self.time = None;
    }

    /// Checks the form and builds the submission payload.
    ///
    /// # Errors
    ///
    /// * `BookingError::Validation` - a service, date or time is missing, the
    ///   time is no longer among the available slots, or the date lies beyond
    ///   the booking horizon
    /// * `BookingError::PastDateTime` - the start is not strictly after `now`
    pub fn validate(&self, now: NaiveDateTime) -> BookingResult<CreateAppointmentRequest> {
        if self.services.is_empty() {
            return Err(BookingError::Validation(
                "Select at least one service".to_string(),
            ));
        }
        let date = self
            .date
            .ok_or_else(|| BookingError::Validation("Select a date".to_string()))?;
        let time = self
            .time
            .ok_or_else(|| BookingError::Validation("Select a time".to_string()))?;

        // Re-derive rather than trust the cached list
        let slots = self.compute_slots();
        if !slots.contains(&time) {
            return Err(BookingError::Validation(format!(
                "{} is no longer available on {}",
                time, date
            )));
        }

        let start_date_time = time.on(date);
        if start_date_time <= now {
            return Err(BookingError::PastDateTime(start_date_time));
        }

        if !self.is_date_selectable(date, now.date()) {
            return Err(BookingError::Validation(format!(
                "{} is more than {} days ahead",
                date, self.policy.horizon_days
            )));
        }

        Ok(CreateAppointmentRequest {
            client_id: self.client_id,
            establishment_id: self.establishment_id,
            service_ids: self.services.ids(),
            start_date_time,
        })
    }

    /// Validates the form and submits the booking.
    ///
    /// Nothing is sent unless validation passes. A backend failure is returned
    /// as-is and leaves the form untouched so it can be resubmitted; a success
    /// clears the selections. Dropping the returned future before it completes
    /// leaves the form as it was.
    pub async fn submit<A>(&mut self, api: &A, now: NaiveDateTime) -> BookingResult<Appointment>
    where
        A: BarberHubApi + ?Sized,
    {
        let request = self.validate(now)?;
        info!(
            "Submitting booking for client {} at establishment {} starting {}",
            request.client_id, request.establishment_id, request.start_date_time
        );

        match api.create_appointment(&request).await {
            Ok(appointment) => {
                info!("Booking {} created", appointment.id);
                self.services.clear();
                self.date = None;
                self.time = None;
                self.recompute();
                Ok(appointment)
            }
            Err(e) => {
                error!("Booking submission failed: {}", e);
                Err(e)
            }
        }
    }

    fn find_service(&self, id: ServiceId) -> BookingResult<&Service> {
        self.catalog
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| BookingError::NotFound(format!("Service with ID {} not found", id)))
    }

    fn compute_slots(&self) -> Vec<TimeSlot> {
        match self.date {
            Some(date) => slots_for_date(
                &self.index,
                date,
                self.services.total_duration_minutes(),
                self.policy.step_minutes,
            ),
            None => Vec::new(),
        }
    }

    fn recompute(&mut self) {
        self.available_times = self.compute_slots();
        debug!(
            "Recomputed {} available times for date {:?} and {} minutes of service",
            self.available_times.len(),
            self.date,
            self.services.total_duration_minutes()
        );
    }
}
