//! Environment variable naming for configuration overrides and secrets.
//!
//! Plain settings are overridden through `CLINIC__SECTION__KEY` variables,
//! which the `config` crate picks up directly. Secrets are marked in the
//! config files with the literal value `secret_from_env` and resolved here,
//! first from `CLINIC_SECRET_SECTION_KEY`, then from the shorter
//! `SECTION_KEY` form.

use serde_json::Value;
use std::env;
use tracing::warn;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "CLINIC";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "CLINIC_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value that asks for a secret to be read from the environment.
pub const SECRET_MARKER: &str = "secret_from_env";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a secret path to an environment variable name
///
/// `email.api_key` becomes `CLINIC_SECRET_EMAIL_API_KEY`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Short form of a secret variable name
///
/// `twilio.auth_token` becomes `TWILIO_AUTH_TOKEN`.
pub fn short_secret_path_to_env_var(path: &str) -> String {
    path.replace('.', SECRET_SEPARATOR).to_uppercase()
}

/// Look up a secret, preferring the prefixed name over the short one.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    env::var(secret_path_to_env_var(path))
        .or_else(|_| env::var(short_secret_path_to_env_var(path)))
        .ok()
}

/// Replace every `secret_from_env` string in `value` with its environment
/// value. Markers without a matching variable become `null`, so optional
/// fields deserialize as absent and mandatory ones fail loudly.
///
/// Returns the paths that could not be resolved.
pub fn inject_env_secrets(value: &mut Value) -> Vec<String> {
    fn walk(path: &mut Vec<String>, obj: &mut Value, missing: &mut Vec<String>) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    path.push(k.to_string());
                    walk(path, v, missing);
                    path.pop();
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                match get_secret_env_var(&path_str) {
                    Some(env_val) => *obj = Value::String(env_val),
                    None => {
                        warn!("No environment value for secret {}", path_str);
                        missing.push(path_str);
                        *obj = Value::Null;
                    }
                }
            }
            _ => {}
        }
    }

    let mut missing = Vec::new();
    walk(&mut Vec::new(), value, &mut missing);
    missing
}
