// --- File: crates/clinic_booking/src/routes.rs ---

use crate::handlers::{
    appointment_modes_handler, book_appointment_handler, get_available_slots_handler,
    health_handler,
};
use crate::state::BookingState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Booking API routes, meant to be nested under `/api`.
pub fn routes(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/available-slots/{date}", get(get_available_slots_handler))
        .route("/book-appointment", post(book_appointment_handler))
        .route("/health", get(health_handler))
        .route("/appointment-modes", get(appointment_modes_handler))
        .with_state(state)
}
