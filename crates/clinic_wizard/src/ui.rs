// --- File: crates/clinic_wizard/src/ui.rs ---
//! Interactive prompts driving the [`BookingWizard`].
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clinic_common::models::{AppointmentMode, BookingConfirmation, TimeSlot};
use clinic_common::timezone::{format_long_date, parse_calendar_date, today_in};
use inquire::validator::Validation;
use inquire::{CustomUserError, InquireError, Select, Text};
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::api::ApiClient;
use crate::calendar::MonthView;
use crate::form::{validate_email, validate_required, BookingForm};
use crate::state::{BookingStep, BookingWizard, WizardError};

#[derive(Debug, Error)]
pub enum UiError {
    #[error(transparent)]
    Prompt(#[from] InquireError),

    #[error(transparent)]
    Wizard(#[from] WizardError),
}

enum Flow {
    Continue,
    Quit,
}

enum DateChoice {
    Day(NaiveDate),
    PreviousMonth,
    NextMonth,
    Quit,
}

impl fmt::Display for DateChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateChoice::Day(date) => f.write_str(&format_long_date(*date)),
            DateChoice::PreviousMonth => f.write_str("← Previous month"),
            DateChoice::NextMonth => f.write_str("Next month →"),
            DateChoice::Quit => f.write_str("Quit"),
        }
    }
}

enum TimeChoice {
    Slot(TimeSlot),
    Back,
}

impl fmt::Display for TimeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeChoice::Slot(slot) => f.write_str(&slot.label),
            TimeChoice::Back => f.write_str("← Go back"),
        }
    }
}

struct ModeChoice(AppointmentMode);

impl fmt::Display for ModeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.label())
    }
}

enum SubmitChoice {
    Book,
    Edit,
    Back,
}

impl fmt::Display for SubmitChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitChoice::Book => f.write_str("Book appointment"),
            SubmitChoice::Edit => f.write_str("Edit details"),
            SubmitChoice::Back => f.write_str("← Go back"),
        }
    }
}

enum DoneChoice {
    NewBooking,
    Quit,
}

impl fmt::Display for DoneChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoneChoice::NewBooking => f.write_str("New booking"),
            DoneChoice::Quit => f.write_str("Quit"),
        }
    }
}

/// `[1 Select Date] > 2 Select Time > 3 Enter Details > 4 Confirmation`
pub fn step_indicator(current: BookingStep) -> String {
    BookingStep::ALL
        .iter()
        .map(|step| {
            if *step == current {
                format!("[{} {}]", step.number(), step.label())
            } else {
                format!("{} {}", step.number(), step.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" > ")
}

/// The final screen, including the SMS text the patient was sent.
pub fn confirmation_summary(confirmation: &BookingConfirmation) -> String {
    let appointment = &confirmation.appointment;
    let date = parse_calendar_date(&appointment.date)
        .map(format_long_date)
        .unwrap_or_else(|_| appointment.date.clone());

    let mut lines = vec![
        format!("✅ {}", confirmation.message),
        String::new(),
        format!("  Name:   {}", appointment.name),
        format!("  Date:   {}", date),
        format!("  Time:   {}", appointment.time),
        format!("  Mode:   {}", appointment.mode.label()),
        format!("  Phone:  {}", appointment.phone),
        format!("  Email:  {}", appointment.email),
    ];
    if let Some(notes) = appointment.notes.as_deref().filter(|n| !n.is_empty()) {
        lines.push(format!("  Notes:  {}", notes));
    }
    lines.push(String::new());
    lines.push(if confirmation.email_sent {
        format!("A confirmation email was sent to {}.", appointment.email)
    } else {
        "No confirmation email could be sent.".to_string()
    });
    lines.push(format!("SMS to {}:", appointment.phone));
    lines.extend(confirmation.sms_message.lines().map(|l| format!("  {}", l)));
    lines.join("\n")
}

fn required(field: &'static str) -> impl Fn(&str) -> Result<Validation, CustomUserError> + Clone {
    move |input: &str| {
        Ok(match validate_required(field, input) {
            Ok(()) => Validation::Valid,
            Err(e) => Validation::Invalid(e.to_string().into()),
        })
    }
}

fn email_shape(input: &str) -> Result<Validation, CustomUserError> {
    Ok(match validate_email(input) {
        Ok(()) => Validation::Valid,
        Err(e) => Validation::Invalid(e.to_string().into()),
    })
}

pub struct WizardUi {
    api: ApiClient,
    time_zone: Tz,
}

impl WizardUi {
    pub fn new(api: ApiClient, time_zone: Tz) -> Self {
        Self { api, time_zone }
    }

    fn today(&self) -> NaiveDate {
        today_in(self.time_zone, Utc::now())
    }

    /// Runs until the user quits. Esc or Ctrl-C also quit.
    pub async fn run(&self) -> Result<(), UiError> {
        let health = self.api.health().await;
        if health.status == "OK" {
            let calendar = if health.google_calendar { "on" } else { "off" };
            println!("Connected to {} (calendar sync {}).", self.api.base_url(), calendar);
        } else {
            println!(
                "⚠️ {} is not reachable; showing the default schedule.",
                self.api.base_url()
            );
        }
        let modes = self.api.appointment_modes().await;

        let today = self.today();
        let mut wizard = BookingWizard::new(today);
        let mut month = MonthView::containing(today, today, None);
        let mut form = BookingForm::default();

        loop {
            println!("\n{}\n", step_indicator(wizard.step()));
            let outcome = match wizard.step() {
                BookingStep::DateSelection => self.date_step(&mut wizard, &mut month),
                BookingStep::TimeSelection => self.time_step(&mut wizard).await,
                BookingStep::DetailEntry => self.detail_step(&mut wizard, &mut form, &modes).await,
                BookingStep::Confirmation => {
                    self.confirmation_step(&mut wizard, &mut month, &mut form)
                }
            };

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit)
                | Err(UiError::Prompt(
                    InquireError::OperationCanceled | InquireError::OperationInterrupted,
                )) => {
                    println!("Goodbye!");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn date_step(&self, wizard: &mut BookingWizard, month: &mut MonthView) -> Result<Flow, UiError> {
        loop {
            *month = MonthView::containing(month.first_day(), wizard.today(), wizard.selected_date());
            println!("{}", month.render());
            println!(
                "(n) unavailable  [n] selected. Weekends are not available. Times are in {}.",
                self.time_zone
            );

            let mut options: Vec<DateChoice> = month.selectable_days().map(DateChoice::Day).collect();
            let cursor = wizard
                .selected_date()
                .and_then(|d| options.iter().position(|o| matches!(o, DateChoice::Day(x) if *x == d)))
                .unwrap_or(0);
            options.extend([DateChoice::PreviousMonth, DateChoice::NextMonth, DateChoice::Quit]);

            let choice = Select::new(&format!("Pick a day in {}:", month.title()), options)
                .with_starting_cursor(cursor)
                .with_page_size(12)
                .prompt()?;

            match choice {
                DateChoice::Day(date) => {
                    wizard.select_date(date)?;
                    return Ok(Flow::Continue);
                }
                DateChoice::PreviousMonth => *month = month.previous(),
                DateChoice::NextMonth => *month = month.next(),
                DateChoice::Quit => return Ok(Flow::Quit),
            }
        }
    }

    async fn time_step(&self, wizard: &mut BookingWizard) -> Result<Flow, UiError> {
        let Some(date) = wizard.selected_date() else {
            wizard.go_back()?;
            return Ok(Flow::Continue);
        };

        println!("Available times for {} ({}):", format_long_date(date), self.time_zone);
        let slots = self.api.available_slots(date).await;
        debug!("{} slot(s) for {}", slots.len(), date);
        if slots.is_empty() {
            println!("No available slots for this date. Please choose another day.");
        }

        let cursor = wizard
            .selected_slot()
            .and_then(|selected| slots.iter().position(|s| s.time == selected.time))
            .unwrap_or(0);
        let mut options: Vec<TimeChoice> = slots.into_iter().map(TimeChoice::Slot).collect();
        options.push(TimeChoice::Back);

        match Select::new("Pick a time:", options)
            .with_starting_cursor(cursor)
            .with_page_size(10)
            .prompt()?
        {
            TimeChoice::Slot(slot) => wizard.select_time(slot)?,
            TimeChoice::Back => wizard.go_back()?,
        }
        Ok(Flow::Continue)
    }

    async fn detail_step(
        &self,
        wizard: &mut BookingWizard,
        form: &mut BookingForm,
        modes: &[AppointmentMode],
    ) -> Result<Flow, UiError> {
        let (Some(date), Some(slot)) = (wizard.selected_date(), wizard.selected_slot().cloned())
        else {
            wizard.go_back()?;
            return Ok(Flow::Continue);
        };

        println!("📅 {}   🕘 {}", format_long_date(date), slot.label);

        form.name = Text::new("Full name *")
            .with_initial_value(&form.name)
            .with_validator(required("Full name"))
            .prompt()?;
        form.phone = Text::new("Phone number *")
            .with_initial_value(&form.phone)
            .with_help_message("e.g. +91 9876543210")
            .with_validator(required("Phone number"))
            .prompt()?;
        form.email = Text::new("Email address *")
            .with_initial_value(&form.email)
            .with_validator(required("Email address"))
            .with_validator(email_shape)
            .prompt()?;

        let cursor = modes.iter().position(|m| *m == form.mode).unwrap_or(0);
        let options: Vec<ModeChoice> = modes.iter().copied().map(ModeChoice).collect();
        form.mode = Select::new("Appointment mode *", options)
            .with_starting_cursor(cursor)
            .prompt()?
            .0;
        form.notes = Text::new("Additional notes")
            .with_initial_value(&form.notes)
            .with_help_message("Optional")
            .prompt()?;

        if let Err(e) = form.validate() {
            println!("❌ {}", e);
            return Ok(Flow::Continue);
        }

        let choice = Select::new(
            "Ready to book?",
            vec![SubmitChoice::Book, SubmitChoice::Edit, SubmitChoice::Back],
        )
        .prompt()?;

        match choice {
            SubmitChoice::Book => {
                println!("Booking...");
                match self.api.book_appointment(&form.to_request(date, &slot.time)).await {
                    Ok(confirmation) if confirmation.success => wizard.complete(confirmation)?,
                    Ok(confirmation) => println!(
                        "❌ Failed to book appointment. Please try again. ({})",
                        confirmation.message
                    ),
                    Err(e) if e.is_conflict() => {
                        println!("⚠️ {}. Please choose another time.", e);
                        wizard.go_back()?;
                    }
                    Err(e) => println!("❌ {}", e),
                }
            }
            SubmitChoice::Edit => {}
            SubmitChoice::Back => wizard.go_back()?,
        }
        Ok(Flow::Continue)
    }

    fn confirmation_step(
        &self,
        wizard: &mut BookingWizard,
        month: &mut MonthView,
        form: &mut BookingForm,
    ) -> Result<Flow, UiError> {
        if let Some(confirmation) = wizard.confirmation() {
            println!("{}\n", confirmation_summary(confirmation));
        }

        match Select::new("What next?", vec![DoneChoice::NewBooking, DoneChoice::Quit]).prompt()? {
            DoneChoice::NewBooking => {
                let today = self.today();
                wizard.new_booking(today)?;
                *month = MonthView::containing(today, today, None);
                *form = BookingForm::default();
                Ok(Flow::Continue)
            }
            DoneChoice::Quit => Ok(Flow::Quit),
        }
    }
}
