//! Outbound email: rendering plus the transports that deliver it.

pub mod mime;
pub mod sendgrid;
pub mod template;

use crate::error::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// A transport that delivers one HTML email per call.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<()>;
}
