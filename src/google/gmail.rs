//! Gmail API v1 send transport.

use super::client::{resource_url, GoogleClient};
use super::oauth::exchange_refresh_token;
use crate::config::{Endpoints, GmailSettings};
use crate::email::mime::{encode_raw, render_message};
use crate::email::template::BRAND_NAME;
use crate::email::{Mailer, OutgoingEmail};
use crate::error::{ApiError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};

pub struct GmailMailer<'a> {
    client: GoogleClient,
    endpoints: &'a Endpoints,
    from_email: &'a str,
}

impl<'a> GmailMailer<'a> {
    /// Exchanges the Gmail refresh token and returns a ready transport.
    pub async fn connect(
        client: Client,
        endpoints: &'a Endpoints,
        settings: &'a GmailSettings,
    ) -> Result<GmailMailer<'a>> {
        let access_token =
            exchange_refresh_token(&client, &endpoints.oauth_token, &settings.credentials).await?;
        Ok(Self {
            client: GoogleClient::new(client, access_token),
            endpoints,
            from_email: &settings.from_email,
        })
    }
}

#[async_trait]
impl Mailer for GmailMailer<'_> {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        debug!(subject = %email.subject, "sending via gmail");

        let message = render_message(BRAND_NAME, self.from_email, email);
        let url = resource_url(&self.endpoints.gmail, &["users", "me", "messages", "send"])?;
        let response = self
            .client
            .post(url, &json!({ "raw": encode_raw(&message) }))
            .await?;

        if let Some(err) = response.get("error") {
            let detail = err
                .get("message")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string());
            return Err(ApiError::unexpected(format!("Gmail send failed: {detail}")));
        }

        info!(
            message_id = response.get("id").and_then(|v| v.as_str()).unwrap_or_default(),
            "gmail accepted message"
        );
        Ok(())
    }
}
