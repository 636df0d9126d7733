// --- File: crates/clinic_notify/src/sms.rs ---
use clinic_common::services::NotificationResult;
use clinic_config::TwilioConfig;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use crate::service::NotifyError;

pub const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// How SMS leave the process.
#[derive(Clone)]
pub enum SmsChannel {
    /// Message is logged, never dispatched.
    Simulated,
    Twilio(TwilioSender),
}

impl SmsChannel {
    pub async fn send(&self, to: &str, body: &str) -> Result<NotificationResult, NotifyError> {
        match self {
            SmsChannel::Simulated => {
                info!("📲 SMS to {} (simulated):\n{}", to, body);
                Ok(NotificationResult {
                    id: format!("sim-{}", uuid::Uuid::new_v4()),
                    status: "simulated".to_string(),
                })
            }
            SmsChannel::Twilio(sender) => sender.send(to, body).await,
        }
    }
}

#[derive(Clone)]
pub struct TwilioSender {
    client: Client,
    api_base: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

#[derive(Debug, Deserialize)]
struct TwilioMessage {
    sid: String,
    #[serde(default)]
    status: Option<String>,
}

impl TwilioSender {
    /// `None` unless both the account SID and the auth token are set.
    pub fn from_config(config: &TwilioConfig, client: Client) -> Option<Self> {
        let account_sid = config.account_sid.clone().filter(|s| !s.is_empty())?;
        let auth_token = config.auth_token.clone().filter(|s| !s.is_empty())?;
        Some(Self {
            client,
            api_base: TWILIO_API_BASE.to_string(),
            account_sid,
            auth_token,
            from_number: config.from_number.clone(),
        })
    }

    pub fn messages_url(&self) -> String {
        format!("{}/Accounts/{}/Messages.json", self.api_base, self.account_sid)
    }

    pub async fn send(&self, to: &str, body: &str) -> Result<NotificationResult, NotifyError> {
        let params = [
            ("To", to),
            ("From", self.from_number.as_str()),
            ("Body", body),
        ];
        info!("Sending SMS to {} via Twilio", to);

        let resp = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            error!("Twilio returned {}: {}", status, text);
            return Err(NotifyError::Api {
                provider: "twilio",
                status_code: status.as_u16(),
                message: text,
            });
        }

        parse_message(&text)
    }
}

fn parse_message(text: &str) -> Result<NotificationResult, NotifyError> {
    let message: TwilioMessage = serde_json::from_str(text)?;
    Ok(NotificationResult {
        id: message.sid,
        status: message.status.unwrap_or_else(|| "queued".to_string()),
    })
}
