// --- File: crates/clinic_notify/src/service.rs ---
use clinic_common::features::{is_email_enabled, is_twilio_enabled};
use clinic_common::services::{BoxFuture, NotificationResult, NotificationService};
use clinic_common::HTTP_CLIENT;
use clinic_config::AppConfig;
use reqwest::Client;
use thiserror::Error;
use tracing::{info, warn};

use crate::email::EmailSender;
use crate::sms::{SmsChannel, TwilioSender};

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("{provider} API returned an error: {message} (Status: {status_code})")]
    Api {
        provider: &'static str,
        status_code: u16,
        message: String,
    },

    /// The channel is switched off or lacks credentials.
    #[error("{0} notifications are disabled")]
    Disabled(&'static str),

    #[error("Unexpected provider response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Email through the mail API when enabled, SMS through Twilio when enabled
/// and simulated otherwise.
pub struct ClinicNotificationService {
    email: Option<EmailSender>,
    sms: SmsChannel,
}

impl ClinicNotificationService {
    pub fn new(email: Option<EmailSender>, sms: SmsChannel) -> Self {
        Self { email, sms }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::from_config_with_client(config, HTTP_CLIENT.clone())
    }

    pub fn from_config_with_client(config: &AppConfig, client: Client) -> Self {
        let email = match config.email.as_ref() {
            Some(email_config) if is_email_enabled(config) => {
                let sender = EmailSender::from_config(email_config, client.clone());
                if sender.is_none() {
                    warn!("use_email is set but email.api_key is missing; email disabled");
                }
                sender
            }
            _ => None,
        };

        let sms = match config.twilio.as_ref() {
            Some(twilio_config) if is_twilio_enabled(config) => {
                match TwilioSender::from_config(twilio_config, client) {
                    Some(sender) => SmsChannel::Twilio(sender),
                    None => {
                        warn!("use_twilio is set but credentials are missing; SMS simulated");
                        SmsChannel::Simulated
                    }
                }
            }
            _ => SmsChannel::Simulated,
        };

        info!(
            "Notifications: email {}, SMS {}",
            if email.is_some() { "enabled" } else { "disabled" },
            match sms {
                SmsChannel::Simulated => "simulated",
                SmsChannel::Twilio(_) => "via Twilio",
            }
        );
        Self::new(email, sms)
    }

    pub fn email_enabled(&self) -> bool {
        self.email.is_some()
    }
}

impl NotificationService for ClinicNotificationService {
    type Error = NotifyError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let to = to.to_string();
        let subject = subject.to_string();
        let body = body.to_string();

        Box::pin(async move {
            match &self.email {
                Some(sender) => sender.send(&to, &subject, &body, is_html).await,
                None => Err(NotifyError::Disabled("email")),
            }
        })
    }

    fn send_sms(&self, to: &str, body: &str) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let to = to.to_string();
        let body = body.to_string();

        Box::pin(async move { self.sms.send(&to, &body).await })
    }
}
