use async_trait::async_trait;
use barberhub_core::{
    errors::BookingResult,
    models::{
        appointment::{Appointment, CreateAppointmentRequest, EstablishmentId},
        hours::WeeklyHours,
        service::Service,
    },
};
use mockall::mock;

use crate::api::BarberHubApi;

// Mock backend for testing
mock! {
    pub BarberHubApi {}

    #[async_trait]
    impl BarberHubApi for BarberHubApi {
        async fn weekly_hours(
            &self,
            establishment_id: EstablishmentId,
        ) -> BookingResult<Vec<WeeklyHours>>;

        async fn services(
            &self,
            establishment_id: EstablishmentId,
        ) -> BookingResult<Vec<Service>>;

        async fn create_appointment(
            &self,
            request: &CreateAppointmentRequest,
        ) -> BookingResult<Appointment>;
    }
}
