// --- File: crates/clinic_common/src/models.rs ---
//! JSON shapes of the booking API.
//!
//! Shared by the server handlers and the wizard's API client so both ends
//! agree on field names. Keys are camelCase on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the appointment takes place.
///
/// `online` and `offline` are the wire values; `remote` and `in-person` are
/// accepted as aliases.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentMode {
    #[serde(alias = "remote")]
    Online,
    #[serde(alias = "in-person", alias = "in_person")]
    Offline,
}

impl AppointmentMode {
    pub const ALL: [AppointmentMode; 2] = [AppointmentMode::Online, AppointmentMode::Offline];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentMode::Online => "online",
            AppointmentMode::Offline => "offline",
        }
    }

    /// Human-facing label used in prompts and emails.
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentMode::Online => "Online (video call)",
            AppointmentMode::Offline => "Offline (in-person visit)",
        }
    }
}

impl fmt::Display for AppointmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" | "remote" => Ok(AppointmentMode::Online),
            "offline" | "in-person" | "in_person" => Ok(AppointmentMode::Offline),
            other => Err(format!("unknown appointment mode '{other}'")),
        }
    }
}

/// Loose shape check: `local@domain.tld`, no whitespace.
pub fn is_plausible_email(input: &str) -> bool {
    let input = input.trim();
    if input.chars().any(char::is_whitespace) {
        return false;
    }
    match input.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
                    .unwrap_or(false)
        }
        None => false,
    }
}

/// One bookable slot as returned by `GET /api/available-slots/{date}`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// UTC instant, e.g. `2026-10-20T04:30:00.000Z`. Empty in client fallbacks.
    pub start: String,
    pub end: String,
    /// Local start as `HH:MM`; the value posted back when booking.
    pub time: String,
    /// e.g. `10:00 AM - 10:30 AM`
    pub label: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailableSlotsResponse {
    pub slots: Vec<TimeSlot>,
}

/// Body of `POST /api/book-appointment`.
///
/// Every field is optional at the serde level so that a missing field is
/// reported as a validation error rather than a JSON rejection.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// `HH:MM`, one of the day's slot times
    pub time: Option<String>,
    pub mode: Option<String>,
}

/// The booked appointment echoed back to the client.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub date: String,
    pub time: String,
    pub start_time: String,
    pub end_time: String,
    pub mode: AppointmentMode,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub success: bool,
    pub message: String,
    /// Id assigned by the calendar; `null` when no calendar is configured.
    #[serde(default)]
    pub event_id: Option<String>,
    pub sms_message: String,
    #[serde(default)]
    pub email_sent: bool,
    pub appointment: AppointmentDetails,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Current wall-clock time in the clinic's zone.
    #[serde(default)]
    pub local_time: Option<String>,
    #[serde(default)]
    pub google_calendar: bool,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentModesResponse {
    pub modes: Vec<AppointmentMode>,
}

impl Default for AppointmentModesResponse {
    fn default() -> Self {
        Self {
            modes: AppointmentMode::ALL.to_vec(),
        }
    }
}

/// Error body produced by `ClinicError`'s `IntoResponse`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    pub code: u16,
}
