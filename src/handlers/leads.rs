//! POST /api/send-quiz-email and /api/send-quiz-gmail: quiz result emails.
//!
//! Both variants validate and render identically; they differ only in the
//! [`Mailer`] that delivers the messages.

use crate::config::Config;
use crate::email::sendgrid::SendGridMailer;
use crate::email::template::{customer_email, internal_email};
use crate::email::Mailer;
use crate::endpoint::{body_text, EndpointPolicy};
use crate::error::Result;
use crate::google::GmailMailer;
use crate::models::lead::LeadSubmission;
use http::Method;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;
use vercel_runtime::{Body, Error, Request, Response};

pub fn policy() -> EndpointPolicy {
    EndpointPolicy {
        allow_methods: "POST,OPTIONS",
        required_method: Some(Method::POST),
        cache_control: None,
        pretty: false,
    }
}

/// Variant delivering through SendGrid.
pub async fn handle_sendgrid(req: Request, config: &Config) -> std::result::Result<Response<Body>, Error> {
    policy()
        .respond(req, |req| async move {
            let settings = config.sendgrid()?;
            let lead = read_lead(&req)?;
            let mailer = SendGridMailer::new(Client::new(), &config.endpoints.sendgrid_send, settings);
            notify(&lead, &mailer, config.internal_email()).await
        })
        .await
}

/// Variant delivering through the Gmail API.
pub async fn handle_gmail(req: Request, config: &Config) -> std::result::Result<Response<Body>, Error> {
    policy()
        .respond(req, |req| async move {
            let settings = config.gmail()?;
            let lead = read_lead(&req)?;
            let mailer = GmailMailer::connect(Client::new(), &config.endpoints, settings).await?;
            notify(&lead, &mailer, config.internal_email()).await
        })
        .await
}

fn read_lead(req: &Request) -> Result<LeadSubmission> {
    let lead = LeadSubmission::from_body(&body_text(req)?)?;
    lead.validate()?;
    Ok(lead)
}

/// Sends the customer email, then the internal copy when an internal address
/// is configured. The first failure aborts.
pub async fn notify<M: Mailer>(lead: &LeadSubmission, mailer: &M, internal: Option<&str>) -> Result<Value> {
    mailer.send(&customer_email(lead)).await?;

    if let Some(to) = internal {
        mailer.send(&internal_email(lead, to)?).await?;
    }

    info!(internal_copy = internal.is_some(), consent = lead.marketing_consent, "quiz lead emailed");
    Ok(json!({ "ok": true }))
}
