//! Runtime feature checks.
//!
//! Integrations are switched twice: at compile time with cargo features on
//! the backend (`gcal`, `twilio`, `openapi`) and at runtime with the
//! `use_*` flags of [`AppConfig`]. A runtime feature counts as enabled only
//! when its flag is set and its configuration section is present.

use clinic_config::AppConfig;

/// `true` when `use_feature` is set and the section exists.
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

pub fn is_gcal_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_gcal, config.gcal.as_ref())
}

pub fn is_email_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_email, config.email.as_ref())
}

pub fn is_twilio_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_twilio, config.twilio.as_ref())
}
