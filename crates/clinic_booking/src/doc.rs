// File: crates/clinic_booking/src/doc.rs

#![cfg(feature = "openapi")]
use clinic_common::models::{
    AppointmentDetails, AppointmentMode, AppointmentModesResponse, AvailableSlotsResponse,
    BookAppointmentRequest, BookingConfirmation, ErrorDetail, ErrorResponse, HealthResponse,
    TimeSlot,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_available_slots_handler,
        crate::handlers::book_appointment_handler,
        crate::handlers::health_handler,
        crate::handlers::appointment_modes_handler,
    ),
    components(schemas(
        TimeSlot,
        AvailableSlotsResponse,
        BookAppointmentRequest,
        BookingConfirmation,
        AppointmentDetails,
        AppointmentMode,
        HealthResponse,
        AppointmentModesResponse,
        ErrorResponse,
        ErrorDetail
    )),
    tags(
        (name = "Booking", description = "Clinic appointment booking API")
    )
)]
pub struct BookingApiDoc;
