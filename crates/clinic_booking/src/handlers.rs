// File: crates/clinic_booking/src/handlers.rs
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{SecondsFormat, Utc};
use clinic_common::error::{internal_error, validation_error, ClinicError};
use clinic_common::models::{
    AppointmentModesResponse, AvailableSlotsResponse, BookAppointmentRequest, BookingConfirmation,
    HealthResponse,
};
use clinic_common::timezone::{parse_calendar_date, to_wire_instant};
use std::sync::Arc;
use tracing::{error, info};

use crate::availability::available_slots;
use crate::logic::{book_appointment, REQUIRED_FIELDS_MESSAGE};
use crate::state::BookingState;

pub const BOOKING_FAILED_MESSAGE: &str = "Could not complete appointment booking";

/// Bookable slots for one day.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/available-slots/{date}",
    params(
        ("date" = String, Path, description = "Calendar day in YYYY-MM-DD format", example = "2026-10-20")
    ),
    responses(
        (status = 200, description = "Bookable slots (empty on weekends and past days)", body = AvailableSlotsResponse),
        (status = 400, description = "Malformed date", body = clinic_common::models::ErrorResponse)
    ),
    tag = "Booking"
))]
pub async fn get_available_slots_handler(
    State(state): State<Arc<BookingState>>,
    Path(date): Path<String>,
) -> Result<Json<AvailableSlotsResponse>, ClinicError> {
    info!("📌 Requested slots for {}", date);
    let date = parse_calendar_date(&date)?;

    let slots = available_slots(&state, date, Utc::now()).await;
    Ok(Json(AvailableSlotsResponse {
        slots: slots.iter().map(|s| s.to_time_slot()).collect(),
    }))
}

/// Books an appointment.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/book-appointment",
    request_body(content = BookAppointmentRequest, example = json!({
        "name": "Asha Rao",
        "phone": "+91 98765 43210",
        "email": "asha@example.com",
        "notes": "First visit",
        "date": "2026-10-20",
        "time": "10:30",
        "mode": "offline"
    })),
    responses(
        (status = 201, description = "Appointment booked", body = BookingConfirmation),
        (status = 400, description = "Missing or malformed fields, or not a slot of that day", body = clinic_common::models::ErrorResponse),
        (status = 409, description = "Slot already booked", body = clinic_common::models::ErrorResponse),
        (status = 500, description = "Booking failed", body = clinic_common::models::ErrorResponse)
    ),
    tag = "Booking"
))]
pub async fn book_appointment_handler(
    State(state): State<Arc<BookingState>>,
    payload: Result<Json<BookAppointmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingConfirmation>), ClinicError> {
    let Json(request) = payload.map_err(|rejection| {
        info!("Rejected booking body: {}", rejection.body_text());
        validation_error(REQUIRED_FIELDS_MESSAGE)
    })?;

    match book_appointment(&state, request, Utc::now()).await {
        Ok(confirmation) => Ok((StatusCode::CREATED, Json(confirmation))),
        Err(err @ (ClinicError::ValidationError(_) | ClinicError::ConflictError(_))) => Err(err),
        Err(err) => {
            error!("❌ Error booking appointment: {}", err);
            Err(internal_error(BOOKING_FAILED_MESSAGE))
        }
    }
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service status", body = HealthResponse)),
    tag = "Booking"
))]
pub async fn health_handler(State(state): State<Arc<BookingState>>) -> Json<HealthResponse> {
    let now = Utc::now();
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Some(to_wire_instant(now)),
        local_time: Some(
            now.with_timezone(&state.schedule.time_zone)
                .to_rfc3339_opts(SecondsFormat::Secs, false),
        ),
        google_calendar: state.calendar_target().is_some(),
    })
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/appointment-modes",
    responses((status = 200, description = "Supported appointment modes", body = AppointmentModesResponse)),
    tag = "Booking"
))]
pub async fn appointment_modes_handler() -> Json<AppointmentModesResponse> {
    Json(AppointmentModesResponse::default())
}
