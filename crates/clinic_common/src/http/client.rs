// --- File: crates/clinic_common/src/http/client.rs ---
use once_cell::sync::Lazy;
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Default timeout for outbound requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shared client for provider calls (mail, messaging).
///
/// Falls back to an unconfigured client if the builder fails, so the
/// process never panics on first use.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    create_client(DEFAULT_TIMEOUT_SECS, true).unwrap_or_else(|err| {
        tracing::warn!("Falling back to default HTTP client: {}", err);
        Client::new()
    })
});

/// Creates a client with a custom timeout and redirect policy.
pub fn create_client(timeout_secs: u64, follow_redirects: bool) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(if follow_redirects {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        })
        .build()
}
