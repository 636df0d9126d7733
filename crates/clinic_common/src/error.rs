// --- File: crates/clinic_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The error type shared across the clinic crates.
///
/// Feature crates keep their own `thiserror` enums and convert into
/// `ClinicError` at the HTTP edge.
#[derive(Error, Debug)]
pub enum ClinicError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// User-correctable input problem
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failure reported by a third-party provider (calendar, mail, messaging)
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// The requested slot overlaps an existing busy interval
    #[error("Conflict: {0}")]
    ConflictError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ClinicError {
    /// The message without the kind prefix, as sent to clients.
    pub fn message(&self) -> &str {
        match self {
            ClinicError::ConfigError(message)
            | ClinicError::ValidationError(message)
            | ClinicError::ConflictError(message)
            | ClinicError::InternalError(message)
            | ClinicError::ExternalServiceError { message, .. } => message,
        }
    }
}

/// Maps an error onto an HTTP status code.
pub trait HttpStatusCode {
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for ClinicError {
    fn status_code(&self) -> u16 {
        match self {
            ClinicError::ConfigError(_) => 500,
            ClinicError::ValidationError(_) => 400,
            ClinicError::ExternalServiceError { .. } => 502,
            ClinicError::ConflictError(_) => 409,
            ClinicError::InternalError(_) => 500,
        }
    }
}

pub fn config_error<T: fmt::Display>(message: T) -> ClinicError {
    ClinicError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> ClinicError {
    ClinicError::ValidationError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> ClinicError {
    ClinicError::ConflictError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> ClinicError {
    ClinicError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> ClinicError {
    ClinicError::InternalError(message.to_string())
}
