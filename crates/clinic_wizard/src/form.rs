// --- File: crates/clinic_wizard/src/form.rs ---
use chrono::{Duration, NaiveDate};
use clinic_common::models::{is_plausible_email, AppointmentMode, BookAppointmentRequest};
use clinic_common::timezone::{format_slot_label, parse_time_of_day};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

/// Contact details entered in the third step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
    pub mode: AppointmentMode,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            notes: String::new(),
            mode: AppointmentMode::Offline,
        }
    }
}

impl BookingForm {
    /// Name, phone and email are required; the email must look like one.
    pub fn validate(&self) -> Result<(), FormError> {
        validate_required("Full name", &self.name)?;
        validate_required("Phone number", &self.phone)?;
        validate_required("Email address", &self.email)?;
        validate_email(&self.email)
    }

    pub fn to_request(&self, date: NaiveDate, time: &str) -> BookAppointmentRequest {
        let notes = self.notes.trim();
        BookAppointmentRequest {
            name: Some(self.name.trim().to_string()),
            phone: Some(self.phone.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            date: Some(date.format("%Y-%m-%d").to_string()),
            time: Some(time.to_string()),
            mode: Some(self.mode.as_str().to_string()),
        }
    }
}

pub fn validate_required(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::Missing(field))
    } else {
        Ok(())
    }
}

pub fn validate_email(value: &str) -> Result<(), FormError> {
    if is_plausible_email(value) {
        Ok(())
    } else {
        Err(FormError::InvalidEmail(value.trim().to_string()))
    }
}

/// `("10:00", 30)` → `10:00 AM - 10:30 AM`. `None` if `start` is not `HH:MM`.
pub fn format_time_range(start: &str, duration_minutes: i64) -> Option<String> {
    let start = parse_time_of_day(start).ok()?;
    let (end, _) = start.overflowing_add_signed(Duration::minutes(duration_minutes));
    Some(format_slot_label(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> BookingForm {
        BookingForm {
            name: " Asha Rao ".into(),
            phone: "+91 98765 43210".into(),
            email: "asha@example.com".into(),
            notes: String::new(),
            mode: AppointmentMode::Online,
        }
    }

    #[test]
    fn complete_form_is_valid() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn first_missing_field_is_reported() {
        let mut form = filled();
        form.phone = "   ".into();
        assert_eq!(form.validate(), Err(FormError::Missing("Phone number")));

        form.name.clear();
        assert_eq!(form.validate(), Err(FormError::Missing("Full name")));
    }

    #[test]
    fn bad_email_is_rejected() {
        let mut form = filled();
        form.email = "asha-at-example".into();
        assert_eq!(
            form.validate(),
            Err(FormError::InvalidEmail("asha-at-example".into()))
        );
    }

    #[test]
    fn request_is_trimmed_and_omits_empty_notes() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let request = filled().to_request(date, "15:30");

        assert_eq!(request.name.as_deref(), Some("Asha Rao"));
        assert_eq!(request.date.as_deref(), Some("2026-10-20"));
        assert_eq!(request.time.as_deref(), Some("15:30"));
        assert_eq!(request.mode.as_deref(), Some("online"));
        assert!(request.notes.is_none());
    }

    #[test]
    fn time_ranges() {
        assert_eq!(format_time_range("10:00", 30).as_deref(), Some("10:00 AM - 10:30 AM"));
        assert_eq!(format_time_range("11:30", 30).as_deref(), Some("11:30 AM - 12:00 PM"));
        assert_eq!(format_time_range("16:30", 30).as_deref(), Some("4:30 PM - 5:00 PM"));
        assert_eq!(format_time_range("10am", 30), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::NaiveTime;
    use clinic_common::timezone::format_12h;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn any_clock_time_gets_a_range(hour in 0u32..24, minute in 0u32..60, duration in 1i64..720) {
            let start = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
            let label = format_time_range(&format!("{:02}:{:02}", hour, minute), duration).unwrap();

            let (from, to) = label.split_once(" - ").unwrap();
            prop_assert_eq!(from, format_12h(start));
            prop_assert_eq!(to, format_12h(start.overflowing_add_signed(Duration::minutes(duration)).0));
        }

        #[test]
        fn text_that_is_not_a_clock_time_gets_none(input in "[a-z ]{0,8}") {
            prop_assert!(format_time_range(&input, 30).is_none());
        }
    }
}
