//! SendGrid v3 mail-send transport.

use super::{Mailer, OutgoingEmail};
use crate::config::SendGridSettings;
use crate::email::template::BRAND_NAME;
use crate::error::{ApiError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error};

pub struct SendGridMailer<'a> {
    client: Client,
    endpoint: &'a str,
    settings: &'a SendGridSettings,
}

impl<'a> SendGridMailer<'a> {
    pub fn new(client: Client, endpoint: &'a str, settings: &'a SendGridSettings) -> Self {
        Self {
            client,
            endpoint,
            settings,
        }
    }

    fn payload(&self, email: &OutgoingEmail) -> Value {
        json!({
            "personalizations": [{ "to": [{ "email": email.to }], "subject": email.subject }],
            "from": { "email": self.settings.from_email, "name": BRAND_NAME },
            "content": [{ "type": "text/html", "value": email.html }],
        })
    }
}

#[async_trait]
impl Mailer for SendGridMailer<'_> {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        debug!(subject = %email.subject, "sending via sendgrid");

        let response = self
            .client
            .post(self.endpoint)
            .bearer_auth(&self.settings.api_key)
            .json(&self.payload(email))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!(status = status.as_u16(), "sendgrid rejected message");
        Err(ApiError::unexpected(format!(
            "SendGrid send failed (HTTP {}): {}",
            status.as_u16(),
            body
        )))
    }
}
