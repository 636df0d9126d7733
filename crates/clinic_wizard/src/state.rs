// --- File: crates/clinic_wizard/src/state.rs ---
//! The four-step booking flow.
//!
//! `DateSelection → TimeSelection → DetailEntry → Confirmation`, with "go
//! back" from the two middle steps and a full reset from `Confirmation`.
//! Every transition checks the current step; a transition that does not
//! apply returns [`WizardError::InvalidTransition`] and leaves the wizard
//! untouched.
use chrono::NaiveDate;
use clinic_common::models::{BookingConfirmation, TimeSlot};
use std::fmt;
use thiserror::Error;

use crate::calendar::is_bookable_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    DateSelection,
    TimeSelection,
    DetailEntry,
    Confirmation,
}

impl BookingStep {
    pub const ALL: [BookingStep; 4] = [
        BookingStep::DateSelection,
        BookingStep::TimeSelection,
        BookingStep::DetailEntry,
        BookingStep::Confirmation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BookingStep::DateSelection => "Select Date",
            BookingStep::TimeSelection => "Select Time",
            BookingStep::DetailEntry => "Enter Details",
            BookingStep::Confirmation => "Confirmation",
        }
    }

    /// 1-based position in the flow.
    pub fn number(&self) -> usize {
        match self {
            BookingStep::DateSelection => 1,
            BookingStep::TimeSelection => 2,
            BookingStep::DetailEntry => 3,
            BookingStep::Confirmation => 4,
        }
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("Cannot {action} during '{step}'")]
    InvalidTransition {
        step: BookingStep,
        action: &'static str,
    },

    #[error("{0} is not available for appointments")]
    DateUnavailable(NaiveDate),
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: BookingStep,
    today: NaiveDate,
    selected_date: Option<NaiveDate>,
    selected_slot: Option<TimeSlot>,
    confirmation: Option<BookingConfirmation>,
}

impl BookingWizard {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            step: BookingStep::DateSelection,
            today,
            selected_date: None,
            selected_slot: None,
            confirmation: None,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_slot(&self) -> Option<&TimeSlot> {
        self.selected_slot.as_ref()
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        self.confirmation.as_ref()
    }

    fn expect_step(&self, step: BookingStep, action: &'static str) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                step: self.step,
                action,
            })
        }
    }

    /// Picks the day. Weekends and past days are rejected.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), WizardError> {
        self.expect_step(BookingStep::DateSelection, "select a date")?;
        if !is_bookable_date(date, self.today) {
            return Err(WizardError::DateUnavailable(date));
        }
        if self.selected_date != Some(date) {
            self.selected_slot = None;
        }
        self.selected_date = Some(date);
        self.step = BookingStep::TimeSelection;
        Ok(())
    }

    pub fn select_time(&mut self, slot: TimeSlot) -> Result<(), WizardError> {
        self.expect_step(BookingStep::TimeSelection, "select a time")?;
        self.selected_slot = Some(slot);
        self.step = BookingStep::DetailEntry;
        Ok(())
    }

    /// Records the server's confirmation of the submitted details.
    pub fn complete(&mut self, confirmation: BookingConfirmation) -> Result<(), WizardError> {
        self.expect_step(BookingStep::DetailEntry, "confirm a booking")?;
        self.confirmation = Some(confirmation);
        self.step = BookingStep::Confirmation;
        Ok(())
    }

    /// One step back. Selections are kept so the previous choice stays
    /// highlighted.
    pub fn go_back(&mut self) -> Result<(), WizardError> {
        self.step = match self.step {
            BookingStep::TimeSelection => BookingStep::DateSelection,
            BookingStep::DetailEntry => BookingStep::TimeSelection,
            step => {
                return Err(WizardError::InvalidTransition {
                    step,
                    action: "go back",
                })
            }
        };
        Ok(())
    }

    /// Clears everything and starts over, with `today` refreshed.
    pub fn new_booking(&mut self, today: NaiveDate) -> Result<(), WizardError> {
        self.expect_step(BookingStep::Confirmation, "start a new booking")?;
        *self = Self::new(today);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_common::models::{AppointmentDetails, AppointmentMode};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slot(time: &str) -> TimeSlot {
        TimeSlot {
            start: String::new(),
            end: String::new(),
            time: time.to_string(),
            label: format!("{time} slot"),
        }
    }

    fn confirmation() -> BookingConfirmation {
        BookingConfirmation {
            success: true,
            message: "Appointment successfully booked".into(),
            event_id: Some("evt-1".into()),
            sms_message: "✅ Appointment confirmed!".into(),
            email_sent: true,
            appointment: AppointmentDetails {
                name: "Asha Rao".into(),
                phone: "+91 98765 43210".into(),
                email: "asha@example.com".into(),
                notes: None,
                date: "2026-10-20".into(),
                time: "10:00".into(),
                start_time: "2026-10-20T04:30:00.000Z".into(),
                end_time: "2026-10-20T05:00:00.000Z".into(),
                mode: AppointmentMode::Offline,
            },
        }
    }

    // Wednesday
    const TODAY: (i32, u32, u32) = (2026, 10, 14);

    fn wizard() -> BookingWizard {
        BookingWizard::new(date(TODAY.0, TODAY.1, TODAY.2))
    }

    #[test]
    fn happy_path_walks_all_four_steps() {
        let mut w = wizard();
        assert_eq!(w.step(), BookingStep::DateSelection);

        w.select_date(date(2026, 10, 20)).unwrap();
        assert_eq!(w.step(), BookingStep::TimeSelection);

        w.select_time(slot("10:00")).unwrap();
        assert_eq!(w.step(), BookingStep::DetailEntry);

        w.complete(confirmation()).unwrap();
        assert_eq!(w.step(), BookingStep::Confirmation);
        assert_eq!(w.confirmation().unwrap().event_id.as_deref(), Some("evt-1"));
    }

    #[test]
    fn weekend_and_past_dates_are_rejected() {
        let mut w = wizard();
        assert_eq!(
            w.select_date(date(2026, 10, 17)),
            Err(WizardError::DateUnavailable(date(2026, 10, 17)))
        );
        assert_eq!(
            w.select_date(date(2026, 10, 13)),
            Err(WizardError::DateUnavailable(date(2026, 10, 13)))
        );
        assert_eq!(w.step(), BookingStep::DateSelection);
        assert!(w.selected_date().is_none());

        // today itself is fine
        w.select_date(date(2026, 10, 14)).unwrap();
    }

    #[test]
    fn back_navigation_keeps_selections() {
        let mut w = wizard();
        w.select_date(date(2026, 10, 20)).unwrap();
        w.select_time(slot("15:30")).unwrap();

        w.go_back().unwrap();
        assert_eq!(w.step(), BookingStep::TimeSelection);
        assert_eq!(w.selected_slot().unwrap().time, "15:30");

        w.go_back().unwrap();
        assert_eq!(w.step(), BookingStep::DateSelection);
        assert_eq!(w.selected_date(), Some(date(2026, 10, 20)));
    }

    #[test]
    fn picking_another_date_drops_the_time() {
        let mut w = wizard();
        w.select_date(date(2026, 10, 20)).unwrap();
        w.select_time(slot("10:00")).unwrap();
        w.go_back().unwrap();
        w.go_back().unwrap();

        w.select_date(date(2026, 10, 21)).unwrap();
        assert!(w.selected_slot().is_none());
    }

    #[test]
    fn out_of_order_transitions_are_invalid() {
        let mut w = wizard();
        assert_eq!(
            w.go_back(),
            Err(WizardError::InvalidTransition {
                step: BookingStep::DateSelection,
                action: "go back"
            })
        );
        assert!(w.select_time(slot("10:00")).is_err());
        assert!(w.complete(confirmation()).is_err());
        assert!(w.new_booking(date(2026, 10, 14)).is_err());

        w.select_date(date(2026, 10, 20)).unwrap();
        assert!(w.select_date(date(2026, 10, 21)).is_err());
        assert_eq!(w.selected_date(), Some(date(2026, 10, 20)));
    }

    #[test]
    fn confirmation_only_allows_a_new_booking() {
        let mut w = wizard();
        w.select_date(date(2026, 10, 20)).unwrap();
        w.select_time(slot("10:00")).unwrap();
        w.complete(confirmation()).unwrap();

        assert!(w.go_back().is_err());

        w.new_booking(date(2026, 10, 15)).unwrap();
        assert_eq!(w.step(), BookingStep::DateSelection);
        assert_eq!(w.today(), date(2026, 10, 15));
        assert!(w.selected_date().is_none());
        assert!(w.selected_slot().is_none());
        assert!(w.confirmation().is_none());
    }

    #[test]
    fn steps_are_numbered_in_order() {
        let numbers: Vec<usize> = BookingStep::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(BookingStep::DetailEntry.to_string(), "Enter Details");
    }
}
