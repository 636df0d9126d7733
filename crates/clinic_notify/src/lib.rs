// --- File: crates/clinic_notify/src/lib.rs ---
/// Transactional email over an HTTP mail API.
pub mod email;
/// Notification service combining the email and SMS senders.
pub mod service;
/// SMS: simulated by default, Twilio when configured.
pub mod sms;
/// Confirmation message bodies.
pub mod templates;

pub use service::{ClinicNotificationService, NotifyError};
pub use templates::AppointmentNotice;
