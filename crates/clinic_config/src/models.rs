// --- File: crates/clinic_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding a built frontend; served with an index.html fallback.
    #[serde(default)]
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            static_dir: None,
        }
    }
}

// --- Clinic Profile ---
// Baked into the notification templates.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClinicConfig {
    pub name: String,
    pub doctor_name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            name: "GenepowerX Clinic".to_string(),
            doctor_name: "Dr. Hima".to_string(),
            address: "Suit # 2B, Plot No.240, Nirvana, Road No. 36, Jawahar Colony, Jubilee Hills, Hyderabad, Telangana 50003".to_string(),
            phone: "+91-95022 22300".to_string(),
            website: "https://genepowerx.com/".to_string(),
        }
    }
}

// --- Schedule ---
/// One daily availability window in local civil time, "HH:MM" each side.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub start: String,
    pub end: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScheduleConfig {
    /// IANA zone the clinic's wall clock runs on.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: i64,
    /// Three-letter weekday names ("Mon", "Tue", ...).
    #[serde(default = "default_working_days")]
    pub working_days: Vec<String>,
    #[serde(default = "default_windows")]
    pub windows: Vec<WindowConfig>,
    /// Minimum notice before a slot may be booked. Unset means any slot of
    /// today or later is offered.
    #[serde(default)]
    pub lead_time_minutes: Option<i64>,
}

fn default_time_zone() -> String {
    "Asia/Kolkata".to_string()
}

fn default_slot_minutes() -> i64 {
    30
}

fn default_working_days() -> Vec<String> {
    ["Mon", "Tue", "Wed", "Thu", "Fri"]
        .iter()
        .map(|d| d.to_string())
        .collect()
}

fn default_windows() -> Vec<WindowConfig> {
    vec![
        WindowConfig {
            start: "10:00".to_string(),
            end: "12:00".to_string(),
        },
        WindowConfig {
            start: "15:00".to_string(),
            end: "17:00".to_string(),
        },
    ]
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
            slot_minutes: default_slot_minutes(),
            working_days: default_working_days(),
            windows: default_windows(),
            lead_time_minutes: None,
        }
    }
}

// --- Google Calendar Config ---
// Credentials come either from a service-account key file or inline JSON
// (GCAL_CREDENTIALS_JSON via "secret_from_env").
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    pub calendar_id: Option<String>, // Mandatory
    #[serde(default)]
    pub key_path: Option<String>,
    #[serde(default)]
    pub credentials_json: Option<String>,
    #[serde(default = "default_reminder_email_minutes")]
    pub reminder_email_minutes: i32,
    #[serde(default = "default_reminder_popup_minutes")]
    pub reminder_popup_minutes: i32,
}

fn default_reminder_email_minutes() -> i32 {
    24 * 60
}

fn default_reminder_popup_minutes() -> i32 {
    30
}

// --- Email Config ---
// api_key is normally "secret_from_env" -> EMAIL_API_KEY
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmailConfig {
    #[serde(default = "default_email_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub from_address: String,
    #[serde(default)]
    pub from_name: Option<String>,
}

fn default_email_api_base() -> String {
    "https://api.sendgrid.com".to_string()
}

// --- Twilio Config ---
// Holds Twilio messaging credentials; auth_token normally "secret_from_env".
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TwilioConfig {
    #[serde(default)]
    pub account_sid: Option<String>,
    #[serde(default)]
    pub auth_token: Option<String>,
    pub from_number: String,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,
    #[serde(default)]
    pub use_email: bool,
    #[serde(default)]
    pub use_twilio: bool,

    #[serde(default)]
    pub clinic: ClinicConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub email: Option<EmailConfig>,
    #[serde(default)]
    pub twilio: Option<TwilioConfig>,
}
