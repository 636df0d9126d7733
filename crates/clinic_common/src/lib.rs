// --- File: crates/clinic_common/src/lib.rs ---

pub mod error; // Error taxonomy shared by every crate
pub mod features; // Runtime feature checks
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Wire DTOs shared by server and wizard
pub mod services; // Service abstractions
pub mod timezone; // Civil time <-> UTC helpers

// Re-export error types and utilities for easier access
pub use error::{
    config_error, conflict, external_service_error, internal_error, validation_error, ClinicError,
    HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, HTTP_CLIENT},
    IntoHttpResponse,
};

pub use logging::{init, init_with_level};

pub use features::is_feature_enabled;
