// --- File: crates/clinic_notify/src/email.rs ---
use clinic_common::services::NotificationResult;
use clinic_config::EmailConfig;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::service::NotifyError;

/// Sends mail through a SendGrid-compatible `v3/mail/send` endpoint.
#[derive(Clone)]
pub struct EmailSender {
    client: Client,
    api_base: String,
    api_key: String,
    from_address: String,
    from_name: Option<String>,
}

impl EmailSender {
    /// `None` when the API key is missing.
    pub fn from_config(config: &EmailConfig, client: Client) -> Option<Self> {
        let api_key = config.api_key.clone().filter(|k| !k.trim().is_empty())?;
        Some(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
            from_address: config.from_address.clone(),
            from_name: config.from_name.clone(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v3/mail/send", self.api_base)
    }

    pub fn payload(&self, to: &str, subject: &str, body: &str, is_html: bool) -> Value {
        let mut from = json!({ "email": self.from_address });
        if let Some(name) = &self.from_name {
            from["name"] = json!(name);
        }
        json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": from,
            "subject": subject,
            "content": [{
                "type": if is_html { "text/html" } else { "text/plain" },
                "value": body,
            }],
        })
    }

    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> Result<NotificationResult, NotifyError> {
        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.payload(to, subject, body, is_html))
            .send()
            .await?;

        let status = resp.status();
        let message_id = resp
            .headers()
            .get("x-message-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!("Mail API returned {}: {}", status, body);
            return Err(NotifyError::Api {
                provider: "email",
                status_code: status.as_u16(),
                message: body,
            });
        }

        info!("Confirmation email accepted for {}", to);
        Ok(NotificationResult {
            id: message_id.unwrap_or_else(|| format!("email-{}", uuid::Uuid::new_v4())),
            status: "queued".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>) -> EmailConfig {
        EmailConfig {
            api_base: "https://mail.example.com/".to_string(),
            api_key: api_key.map(String::from),
            from_address: "appointments@example.com".to_string(),
            from_name: Some("Example Clinic".to_string()),
        }
    }

    #[test]
    fn missing_key_disables_sender() {
        assert!(EmailSender::from_config(&config(None), Client::new()).is_none());
        assert!(EmailSender::from_config(&config(Some("  ")), Client::new()).is_none());
    }

    #[test]
    fn payload_targets_one_recipient_with_html_body() {
        let sender = EmailSender::from_config(&config(Some("sg-key")), Client::new()).unwrap();
        assert_eq!(sender.endpoint(), "https://mail.example.com/v3/mail/send");

        let payload = sender.payload("asha@example.com", "Confirmed", "<p>Hi</p>", true);
        assert_eq!(payload["personalizations"][0]["to"][0]["email"], "asha@example.com");
        assert_eq!(payload["from"]["email"], "appointments@example.com");
        assert_eq!(payload["from"]["name"], "Example Clinic");
        assert_eq!(payload["subject"], "Confirmed");
        assert_eq!(payload["content"][0]["type"], "text/html");
        assert_eq!(payload["content"][0]["value"], "<p>Hi</p>");
    }
}
