// --- File: crates/clinic_booking/src/logic.rs ---
//! Booking: validate, re-check the calendar, create the event, notify.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clinic_common::error::{conflict, external_service_error, validation_error, ClinicError};
use clinic_common::models::{
    is_plausible_email, AppointmentDetails, AppointmentMode, BookAppointmentRequest,
    BookingConfirmation,
};
use clinic_common::services::{CalendarEvent, EventReminder};
use clinic_common::timezone::{
    format_12h, format_display_date, parse_calendar_date, parse_time_of_day, to_wire_instant,
};
use clinic_notify::templates::{
    confirmation_email_html, confirmation_sms, confirmation_subject, AppointmentNotice,
};
use tracing::{error, info, warn};

use crate::availability::overlaps;
use crate::slots::{find_slot, Slot};
use crate::state::BookingState;

pub const BOOKING_SUCCESS_MESSAGE: &str = "Appointment successfully booked";
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill the required fields";
pub const SLOT_TAKEN_MESSAGE: &str = "This time slot is already booked";

/// A booking request that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedBooking {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub mode: AppointmentMode,
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Checks presence of every required field, then the shape of each one.
/// Never touches any external service.
pub fn validate_request(request: &BookAppointmentRequest) -> Result<ValidatedBooking, ClinicError> {
    let fields = [
        ("name", required(&request.name)),
        ("phone", required(&request.phone)),
        ("email", required(&request.email)),
        ("date", required(&request.date)),
        ("time", required(&request.time)),
        ("mode", required(&request.mode)),
    ];
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(field, _)| *field)
        .collect();
    if !missing.is_empty() {
        return Err(validation_error(format!(
            "{}: {}",
            REQUIRED_FIELDS_MESSAGE,
            missing.join(", ")
        )));
    }

    let [(_, Some(name)), (_, Some(phone)), (_, Some(email)), (_, Some(date)), (_, Some(time)), (_, Some(mode))] =
        fields
    else {
        return Err(validation_error(REQUIRED_FIELDS_MESSAGE));
    };

    if !is_plausible_email(email) {
        return Err(validation_error(format!("invalid email address '{}'", email)));
    }
    let date = parse_calendar_date(date)?;
    let time = parse_time_of_day(time)?;
    let mode = mode.parse::<AppointmentMode>().map_err(validation_error)?;

    Ok(ValidatedBooking {
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        notes: required(&request.notes).map(String::from),
        date,
        time,
        mode,
    })
}

/// `Patient: ..`, `Phone: ..`, `Email: ..`, `Appointment mode: ..`, `Notes: ..`
pub fn event_description(booking: &ValidatedBooking) -> String {
    format!(
        "Patient: {}\nPhone: {}\nEmail: {}\nAppointment mode: {}\nNotes: {}",
        booking.name,
        booking.phone,
        booking.email,
        booking.mode,
        booking.notes.as_deref().unwrap_or("No additional notes")
    )
}

pub fn build_calendar_event(state: &BookingState, booking: &ValidatedBooking, slot: &Slot) -> CalendarEvent {
    let (email_minutes, popup_minutes) = state
        .gcal()
        .map(|g| (g.reminder_email_minutes, g.reminder_popup_minutes))
        .unwrap_or((24 * 60, 30));

    CalendarEvent {
        start_time: slot.start,
        end_time: slot.end,
        time_zone: state.schedule.time_zone.name().to_string(),
        summary: format!("Appointment with {}", booking.name),
        description: Some(event_description(booking)),
        reminders: vec![
            EventReminder {
                method: "email".to_string(),
                minutes: email_minutes,
            },
            EventReminder {
                method: "popup".to_string(),
                minutes: popup_minutes,
            },
        ],
    }
}

/// Books one appointment.
///
/// Errors: validation (400) for bad input or a time that is not one of the
/// day's slots, conflict (409) when the calendar reports anything busy in
/// the slot, external service error when the calendar call fails.
/// Notification failures are logged and reported through `email_sent`.
pub async fn book_appointment(
    state: &BookingState,
    request: BookAppointmentRequest,
    now: DateTime<Utc>,
) -> Result<BookingConfirmation, ClinicError> {
    let booking = validate_request(&request)?;
    info!(
        "Booking request: {} on {} at {} ({})",
        booking.name, booking.date, booking.time, booking.mode
    );

    let slot = find_slot(&state.schedule, booking.date, booking.time, now).ok_or_else(|| {
        validation_error(format!(
            "{} at {} is not an available appointment slot",
            booking.date,
            booking.time.format("%H:%M")
        ))
    })?;

    let event_id = match state.calendar_target() {
        Some((calendar, calendar_id)) => {
            let busy = calendar
                .get_busy_times(calendar_id, slot.start, slot.end)
                .await
                .map_err(|e| {
                    error!("Conflict check failed: {}", e);
                    external_service_error("calendar", e)
                })?;

            if busy
                .iter()
                .any(|(busy_start, busy_end)| overlaps(slot.start, slot.end, *busy_start, *busy_end))
            {
                info!("Slot {} on {} already taken", slot.time_key(), booking.date);
                return Err(conflict(SLOT_TAKEN_MESSAGE));
            }

            let created = calendar
                .create_event(calendar_id, build_calendar_event(state, &booking, &slot))
                .await
                .map_err(|e| {
                    error!("Event creation failed: {}", e);
                    external_service_error("calendar", e)
                })?;
            info!("📆 Event created: {:?}", created.event_id);
            created.event_id
        }
        None => {
            warn!("No calendar configured; booking without a calendar event");
            None
        }
    };

    let notice = AppointmentNotice {
        patient_name: booking.name.clone(),
        display_date: format_display_date(booking.date),
        display_time: format_12h(booking.time),
        mode: booking.mode,
    };
    let sms_message = confirmation_sms(state.clinic(), &notice);
    let email_sent = send_notifications(state, &booking, &notice, &sms_message).await;

    Ok(BookingConfirmation {
        success: true,
        message: BOOKING_SUCCESS_MESSAGE.to_string(),
        event_id,
        sms_message,
        email_sent,
        appointment: AppointmentDetails {
            name: booking.name,
            phone: booking.phone,
            email: booking.email,
            notes: booking.notes,
            date: booking.date.format("%Y-%m-%d").to_string(),
            time: slot.time_key(),
            start_time: to_wire_instant(slot.start),
            end_time: to_wire_instant(slot.end),
            mode: booking.mode,
        },
    })
}

// Email then SMS, one after the other. Returns whether the email went out.
async fn send_notifications(
    state: &BookingState,
    booking: &ValidatedBooking,
    notice: &AppointmentNotice,
    sms_message: &str,
) -> bool {
    let Some(notifier) = state.notifier.as_ref() else {
        info!("📲 SMS to {} (no notifier configured):\n{}", booking.phone, sms_message);
        return false;
    };

    let email_sent = match notifier
        .send_email(
            &booking.email,
            &confirmation_subject(state.clinic()),
            &confirmation_email_html(state.clinic(), notice),
            true,
        )
        .await
    {
        Ok(result) => {
            info!("Confirmation email {} ({})", result.id, result.status);
            true
        }
        Err(e) => {
            warn!("Confirmation email to {} not sent: {}", booking.email, e);
            false
        }
    };

    if let Err(e) = notifier.send_sms(&booking.phone, sms_message).await {
        warn!("Confirmation SMS to {} not sent: {}", booking.phone, e);
    }

    email_sent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> BookAppointmentRequest {
        BookAppointmentRequest {
            name: Some("Asha Rao".into()),
            phone: Some("+91 98765 43210".into()),
            email: Some("asha@example.com".into()),
            notes: Some("  ".into()),
            date: Some("2026-10-20".into()),
            time: Some("10:30".into()),
            mode: Some("in-person".into()),
        }
    }

    #[test]
    fn valid_request_is_normalised() {
        let booking = validate_request(&full_request()).unwrap();
        assert_eq!(booking.mode, AppointmentMode::Offline);
        assert_eq!(booking.notes, None);
        assert_eq!(booking.time, NaiveTime::from_hms_opt(10, 30, 0).unwrap());
        assert!(event_description(&booking).ends_with("Notes: No additional notes"));
        assert!(event_description(&booking).contains("Appointment mode: offline"));
    }

    #[test]
    fn every_missing_field_is_named() {
        let request = BookAppointmentRequest {
            name: Some("Asha".into()),
            email: Some(" ".into()),
            ..Default::default()
        };
        let err = validate_request(&request).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Please fill the required fields: phone, email, date, time, mode"
        );
    }

    #[test]
    fn malformed_fields_are_rejected() {
        let mut bad_email = full_request();
        bad_email.email = Some("asha-at-example".into());
        let mut bad_date = full_request();
        bad_date.date = Some("20/10/2026".into());
        let mut bad_time = full_request();
        bad_time.time = Some("half past ten".into());
        let mut bad_mode = full_request();
        bad_mode.mode = Some("carrier pigeon".into());

        for request in [bad_email, bad_date, bad_time, bad_mode] {
            assert!(matches!(
                validate_request(&request),
                Err(ClinicError::ValidationError(_))
            ));
        }
    }
}
