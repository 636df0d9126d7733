// --- File: crates/clinic_wizard/src/api.rs ---
//! Client for the booking API.
//!
//! Read calls never fail: when the server cannot be reached they fall back
//! to the clinic's default schedule, so the wizard stays usable. Only
//! `book_appointment` surfaces errors.
use chrono::NaiveDate;
use clinic_common::http::client::create_client;
use clinic_common::models::{
    AppointmentMode, AppointmentModesResponse, AvailableSlotsResponse, BookAppointmentRequest,
    BookingConfirmation, ErrorResponse, HealthResponse, TimeSlot,
};
use reqwest::Client;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::form::format_time_range;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Start times of the default schedule, shown when slots cannot be fetched.
pub const DEFAULT_SLOT_TIMES: [&str; 8] = [
    "10:00", "10:30", "11:00", "11:30", "15:00", "15:30", "16:00", "16:30",
];
pub const DEFAULT_SLOT_MINUTES: i64 = 30;

const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Could not reach the booking server: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with an error status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

impl ApiError {
    /// The slot was taken between listing and booking.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 409, .. })
    }
}

/// Default slots without UTC instants.
pub fn default_slots() -> Vec<TimeSlot> {
    DEFAULT_SLOT_TIMES
        .iter()
        .map(|time| TimeSlot {
            start: String::new(),
            end: String::new(),
            time: time.to_string(),
            label: format_time_range(time, DEFAULT_SLOT_MINUTES).unwrap_or_else(|| time.to_string()),
        })
        .collect()
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        let client = create_client(REQUEST_TIMEOUT_SECS, true).unwrap_or_else(|err| {
            warn!("Falling back to default HTTP client: {}", err);
            Client::new()
        });
        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Slots of `date`, or [`default_slots`] when the request fails.
    pub async fn available_slots(&self, date: NaiveDate) -> Vec<TimeSlot> {
        match self.try_available_slots(date).await {
            Ok(slots) => slots,
            Err(e) => {
                error!("Error fetching available slots: {}", e);
                default_slots()
            }
        }
    }

    pub async fn try_available_slots(&self, date: NaiveDate) -> Result<Vec<TimeSlot>, ApiError> {
        let url = self.url(&format!("available-slots/{}", date.format("%Y-%m-%d")));
        info!("Fetching available slots: {}", url);

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(rejection(status.as_u16(), resp).await);
        }
        let body: AvailableSlotsResponse = resp.json().await?;
        Ok(body.slots)
    }

    pub async fn book_appointment(
        &self,
        request: &BookAppointmentRequest,
    ) -> Result<BookingConfirmation, ApiError> {
        let resp = self
            .client
            .post(self.url("book-appointment"))
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        info!("Booking response status: {}", status);
        if !status.is_success() {
            return Err(rejection(status.as_u16(), resp).await);
        }
        Ok(resp.json().await?)
    }

    /// Server status; `status: "ERROR"` when unreachable.
    pub async fn health(&self) -> HealthResponse {
        let result = async {
            let resp = self.client.get(self.url("health")).send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(rejection(status.as_u16(), resp).await);
            }
            Ok::<_, ApiError>(resp.json::<HealthResponse>().await?)
        }
        .await;

        result.unwrap_or_else(|e| {
            error!("Health check failed: {}", e);
            HealthResponse {
                status: "ERROR".to_string(),
                timestamp: None,
                local_time: None,
                google_calendar: false,
            }
        })
    }

    /// Supported modes; both when unreachable.
    pub async fn appointment_modes(&self) -> Vec<AppointmentMode> {
        let result = async {
            let resp = self.client.get(self.url("appointment-modes")).send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(rejection(status.as_u16(), resp).await);
            }
            Ok::<_, ApiError>(resp.json::<AppointmentModesResponse>().await?)
        }
        .await;

        match result {
            Ok(body) if !body.modes.is_empty() => body.modes,
            Ok(_) => AppointmentModesResponse::default().modes,
            Err(e) => {
                error!("Error fetching appointment modes: {}", e);
                AppointmentModesResponse::default().modes
            }
        }
    }
}

// Error bodies are `{"error":{"message","code"}}`; anything else gets a
// generic message.
async fn rejection(status: u16, resp: reqwest::Response) -> ApiError {
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error.message)
        .unwrap_or_else(|_| format!("Request failed with status {}", status));
    ApiError::Rejected { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slots_match_the_clinic_schedule() {
        let slots = default_slots();
        assert_eq!(slots.len(), 8);
        assert_eq!(slots[0].label, "10:00 AM - 10:30 AM");
        assert_eq!(slots[3].label, "11:30 AM - 12:00 PM");
        assert_eq!(slots[7].label, "4:30 PM - 5:00 PM");
        assert!(slots.iter().all(|s| s.start.is_empty() && s.end.is_empty()));
    }

    #[test]
    fn base_url_is_normalised() {
        let api = ApiClient::with_client("http://localhost:3001/api/", Client::new());
        assert_eq!(api.base_url(), "http://localhost:3001/api");
        assert_eq!(api.url("health"), "http://localhost:3001/api/health");
    }

    #[test]
    fn conflict_detection() {
        let conflict = ApiError::Rejected {
            status: 409,
            message: "This time slot is already booked".into(),
        };
        assert!(conflict.is_conflict());
        assert_eq!(conflict.to_string(), "This time slot is already booked");
    }
}
