// --- File: crates/clinic_wizard/src/lib.rs ---
pub mod api; // HTTP client for the booking API
pub mod calendar; // Month grid
pub mod form; // Contact details and validation
pub mod state; // Step state machine
pub mod ui; // Interactive prompts

pub use api::{ApiClient, ApiError, DEFAULT_API_URL};
pub use calendar::MonthView;
pub use form::{format_time_range, BookingForm};
pub use state::{BookingStep, BookingWizard, WizardError};
