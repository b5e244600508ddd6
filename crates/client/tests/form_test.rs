use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use barberhub_client::{api::BarberHubApi, form::BookingForm, mock::MockBarberHubApi};
use barberhub_core::{
    availability::{BookingPolicy, generate_slots},
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, CreateAppointmentRequest, EstablishmentId},
        hours::{Weekday, WeeklyHours},
        service::Service,
        time_slot::TimeSlot,
    },
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use mockall::predicate;
use pretty_assertions::assert_eq;

const CLIENT_ID: i64 = 11;
const ESTABLISHMENT_ID: i64 = 4;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn slot(raw: &str) -> TimeSlot {
    raw.parse().unwrap()
}

// 2024-01-08 is a Monday, 2024-01-07 a Sunday
fn monday() -> NaiveDate {
    date(2024, 1, 8)
}

fn sunday() -> NaiveDate {
    date(2024, 1, 7)
}

fn now() -> NaiveDateTime {
    date(2024, 1, 1).and_hms_opt(12, 0, 0).unwrap()
}

/// Open Monday to Saturday 09:00-18:00, closed on Sundays
fn weekly_hours() -> Vec<WeeklyHours> {
    Weekday::ALL
        .iter()
        .filter(|weekday| **weekday != Weekday::Sunday)
        .map(|weekday| {
            WeeklyHours::new(
                *weekday,
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            )
        })
        .collect()
}

fn catalog() -> Vec<Service> {
    vec![
        Service {
            id: 1,
            name: "Corte".to_string(),
            duration_minutes: 30,
            price: 35.0,
        },
        Service {
            id: 2,
            name: "Barba".to_string(),
            duration_minutes: 20,
            price: 25.0,
        },
        Service {
            id: 3,
            name: "Pigmentação".to_string(),
            duration_minutes: 60,
            price: 50.0,
        },
    ]
}

fn form() -> BookingForm {
    BookingForm::new(CLIENT_ID, ESTABLISHMENT_ID, &weekly_hours(), catalog())
}

/// Form with a haircut on Monday at 09:00
fn filled_form() -> BookingForm {
    let mut form = form();
    form.set_services(&[1]).unwrap();
    form.select_date(Some(monday()));
    form.select_time(slot("09:00"));
    form
}

fn api_without_submission() -> MockBarberHubApi {
    let mut api = MockBarberHubApi::new();
    api.expect_create_appointment().never();
    api
}

#[test]
fn test_available_times_follow_inputs() {
    let mut form = form();
    assert!(form.available_times().is_empty());

    form.select_date(Some(monday()));
    // No service selected yet
    assert!(form.available_times().is_empty());

    form.set_services(&[1, 2]).unwrap();
    assert_eq!(form.total_duration_minutes(), 50);
    assert_eq!(form.total_price(), 60.0);

    let hours = form.working_hours().for_date(monday()).copied();
    assert_eq!(form.available_times(), generate_slots(hours.as_ref(), 50, 30).as_slice());
    assert_eq!(form.available_times().first(), Some(&slot("09:00")));
    assert_eq!(form.available_times().last(), Some(&slot("17:00")));

    form.select_date(Some(sunday()));
    assert!(form.available_times().is_empty());

    form.select_date(None);
    assert!(form.available_times().is_empty());
}

#[test]
fn test_custom_policy_step() {
    let mut form = form().with_policy(BookingPolicy {
        horizon_days: 7,
        step_minutes: 15,
    });
    form.set_services(&[3]).unwrap();
    form.select_date(Some(monday()));

    assert_eq!(form.available_times()[..3], [slot("09:00"), slot("09:15"), slot("09:30")]);
    assert_eq!(form.available_times().last(), Some(&slot("17:00")));
    assert!(!form.is_date_selectable(date(2024, 1, 9), date(2024, 1, 1)));
}

#[test]
fn test_selectable_dates_skip_closed_days() {
    let form = form();
    let dates = form.selectable_dates(date(2024, 1, 1));

    // January 2024 has four Sundays
    assert_eq!(dates.len(), 31 - 4);
    assert!(!dates.contains(&sunday()));
    assert!(form.is_date_selectable(monday(), date(2024, 1, 1)));
    assert!(!form.is_date_selectable(date(2023, 12, 30), date(2024, 1, 1)));
}

#[test]
fn test_toggle_service_resets_time() {
    let mut form = filled_form();

    // 09:00 stays a valid start after adding a beard trim, the time is still cleared
    assert!(form.toggle_service(2).unwrap());
    assert_eq!(form.selected_time(), None);
    assert!(form.available_times().contains(&slot("09:00")));

    form.select_time(slot("09:00"));
    assert!(!form.toggle_service(2).unwrap());
    assert_eq!(form.selected_time(), None);
    assert_eq!(form.selected_services().ids(), vec![1]);
}

#[test]
fn test_set_and_clear_services_reset_time() {
    let mut form = filled_form();

    form.set_services(&[1]).unwrap();
    assert_eq!(form.selected_time(), None);

    form.select_time(slot("09:00"));
    form.clear_services();
    assert_eq!(form.selected_time(), None);
    assert!(form.available_times().is_empty());
}

#[test]
fn test_select_date_resets_time() {
    let mut form = filled_form();

    // Same date again still clears the time
    form.select_date(Some(monday()));
    assert_eq!(form.selected_time(), None);

    form.select_time(slot("09:00"));
    form.select_date(Some(date(2024, 1, 9)));
    assert_eq!(form.selected_time(), None);
    assert!(form.available_times().contains(&slot("09:00")));
}

#[test]
fn test_unknown_service_leaves_form_untouched() {
    let mut form = filled_form();

    let result = form.set_services(&[1, 42]);
    assert!(matches!(result, Err(BookingError::NotFound(_))));
    assert_eq!(form.selected_services().ids(), vec![1]);
    assert_eq!(form.selected_time(), Some(slot("09:00")));

    assert!(matches!(form.toggle_service(42), Err(BookingError::NotFound(_))));
    assert_eq!(form.selected_time(), Some(slot("09:00")));
}

#[test]
fn test_set_weekly_hours_keeps_time_but_recomputes() {
    let mut form = filled_form();

    form.set_weekly_hours(&[WeeklyHours::new(
        Weekday::Monday,
        NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
    )]);

    assert_eq!(form.selected_time(), Some(slot("09:00")));
    assert_eq!(form.available_times().first(), Some(&slot("14:00")));
    assert!(matches!(form.validate(now()), Err(BookingError::Validation(_))));
}

#[test]
fn test_validate_builds_request() {
    let mut form = filled_form();
    form.toggle_service(3).unwrap();
    form.select_time(slot("10:30"));

    let request = form.validate(now()).expect("Form should be valid");

    assert_eq!(request.client_id, CLIENT_ID);
    assert_eq!(request.establishment_id, ESTABLISHMENT_ID);
    assert_eq!(request.service_ids, vec![1, 3]);
    assert_eq!(request.start_date_time, monday().and_hms_opt(10, 30, 0).unwrap());
}

#[tokio::test]
async fn test_submit_requires_service() {
    let api = api_without_submission();
    let mut form = form();
    form.select_date(Some(monday()));
    form.select_time(slot("09:00"));

    let result = form.submit(&api, now()).await;
    assert!(matches!(result, Err(BookingError::Validation(_))));
}

#[tokio::test]
async fn test_submit_requires_date() {
    let api = api_without_submission();
    let mut form = form();
    form.set_services(&[1]).unwrap();
    form.select_time(slot("09:00"));

    let result = form.submit(&api, now()).await;
    assert!(matches!(result, Err(BookingError::Validation(_))));
}

#[tokio::test]
async fn test_submit_requires_time() {
    let api = api_without_submission();
    let mut form = form();
    form.set_services(&[1]).unwrap();
    form.select_date(Some(monday()));

    let result = form.submit(&api, now()).await;
    assert!(matches!(result, Err(BookingError::Validation(_))));
}

#[tokio::test]
async fn test_submit_rejects_stale_time() {
    let api = api_without_submission();
    let mut form = filled_form();

    // 17:45 + 30 minutes runs past closing
    form.select_time(slot("17:45"));
    let result = form.submit(&api, now()).await;
    assert!(matches!(result, Err(BookingError::Validation(_))));

    // Off-grid start
    form.select_time(slot("09:10"));
    let result = form.submit(&api, now()).await;
    assert!(matches!(result, Err(BookingError::Validation(_))));
}

#[tokio::test]
async fn test_submit_rejects_past_start() {
    let api = api_without_submission();
    let mut form = filled_form();

    let at_start = monday().and_hms_opt(9, 0, 0).unwrap();
    let result = form.submit(&api, at_start).await;
    match result {
        Err(BookingError::PastDateTime(start)) => assert_eq!(start, at_start),
        other => panic!("Expected PastDateTime error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_submit_rejects_date_beyond_horizon() {
    let api = api_without_submission();
    let mut form = form();

    // 2024-03-04 is a Monday, 63 days after now()
    let far = date(2024, 3, 4);
    form.set_services(&[1]).unwrap();
    form.select_date(Some(far));
    assert!(!form.is_date_selectable(far, now().date()));
    assert!(form.available_times().contains(&slot("09:00")));
    form.select_time(slot("09:00"));

    let result = form.submit(&api, now()).await;
    assert!(matches!(result, Err(BookingError::Validation(_))));
    assert_eq!(form.selected_date(), Some(far));
}

#[test_log::test(tokio::test)]
async fn test_submit_success_resets_form() {
    let mut api = MockBarberHubApi::new();
    api.expect_create_appointment()
        .withf(|request| {
            request.client_id == CLIENT_ID
                && request.establishment_id == ESTABLISHMENT_ID
                && request.service_ids == vec![1]
                && request.start_date_time == monday().and_hms_opt(9, 0, 0).unwrap()
        })
        .times(1)
        .returning(|request| {
            Ok(Appointment {
                id: 99,
                status: Some("PENDING".to_string()),
                start_date_time: Some(request.start_date_time),
            })
        });

    let mut form = filled_form();
    let appointment = form.submit(&api, now()).await.expect("Booking should succeed");

    assert_eq!(appointment.id, 99);
    assert!(form.selected_services().is_empty());
    assert_eq!(form.selected_date(), None);
    assert_eq!(form.selected_time(), None);
    assert!(form.available_times().is_empty());
}

#[tokio::test]
async fn test_submit_remote_error_keeps_form() {
    let mut api = MockBarberHubApi::new();
    api.expect_create_appointment()
        .times(1)
        .returning(|_| Err(BookingError::Remote("Horário indisponível".to_string())));

    let mut form = filled_form();
    let times_before = form.available_times().to_vec();

    let err = form.submit(&api, now()).await.unwrap_err();

    assert_eq!(err.to_string(), "Horário indisponível");
    assert!(!err.is_local());
    assert_eq!(form.selected_services().ids(), vec![1]);
    assert_eq!(form.selected_date(), Some(monday()));
    assert_eq!(form.selected_time(), Some(slot("09:00")));
    assert_eq!(form.available_times(), times_before.as_slice());
}

#[tokio::test]
async fn test_load_fetches_hours_and_services() {
    let mut api = MockBarberHubApi::new();
    api.expect_weekly_hours()
        .with(predicate::eq(ESTABLISHMENT_ID))
        .times(1)
        .returning(|_| Ok(weekly_hours()));
    api.expect_services()
        .with(predicate::eq(ESTABLISHMENT_ID))
        .times(1)
        .returning(|_| Ok(catalog()));

    let form = BookingForm::load(&api, CLIENT_ID, ESTABLISHMENT_ID)
        .await
        .expect("Failed to load form");

    assert_eq!(form.client_id(), CLIENT_ID);
    assert_eq!(form.establishment_id(), ESTABLISHMENT_ID);
    assert_eq!(form.catalog().len(), 3);
    assert_eq!(form.working_hours().len(), 6);
    assert!(!form.working_hours().is_open(Weekday::Sunday));
}

#[tokio::test]
async fn test_load_propagates_remote_error() {
    let mut api = MockBarberHubApi::new();
    api.expect_weekly_hours()
        .returning(|_| Err(BookingError::Remote("Estabelecimento não encontrado".to_string())));
    api.expect_services().never();

    let result = BookingForm::load(&api, CLIENT_ID, ESTABLISHMENT_ID).await;
    assert!(matches!(result, Err(BookingError::Remote(_))));
}

/// Backend whose first booking call never answers
#[derive(Default)]
struct StalledOnceApi {
    calls: AtomicUsize,
}

#[async_trait]
impl BarberHubApi for StalledOnceApi {
    async fn weekly_hours(&self, _establishment_id: EstablishmentId) -> BookingResult<Vec<WeeklyHours>> {
        Ok(weekly_hours())
    }

    async fn services(&self, _establishment_id: EstablishmentId) -> BookingResult<Vec<Service>> {
        Ok(catalog())
    }

    async fn create_appointment(&self, request: &CreateAppointmentRequest) -> BookingResult<Appointment> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            std::future::pending::<()>().await;
        }

        Ok(Appointment {
            id: 7,
            status: None,
            start_date_time: Some(request.start_date_time),
        })
    }
}

#[tokio::test]
async fn test_cancelled_submit_can_be_retried() {
    let api = StalledOnceApi::default();
    let mut form = filled_form();

    let abandoned = tokio::time::timeout(Duration::from_millis(50), form.submit(&api, now())).await;
    assert!(abandoned.is_err());

    // The dropped attempt leaves every selection in place
    assert_eq!(form.selected_services().ids(), vec![1]);
    assert_eq!(form.selected_date(), Some(monday()));
    assert_eq!(form.selected_time(), Some(slot("09:00")));

    let appointment = form
        .submit(&api, now())
        .await
        .expect("Retry after a cancelled submission should succeed");
    assert_eq!(appointment.id, 7);
    assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    assert_eq!(form.selected_time(), None);
}
