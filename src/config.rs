//! Function configuration, read from the environment once per cold start.

use crate::error::{ApiError, Result};
use once_cell::sync::Lazy;
use std::env;

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const ACCOUNT_MANAGEMENT_URL: &str = "https://mybusinessaccountmanagement.googleapis.com/v1";
const BUSINESS_INFORMATION_URL: &str = "https://mybusinessbusinessinformation.googleapis.com/v1";
const BUSINESS_REVIEWS_URL: &str = "https://mybusiness.googleapis.com/v4";
const PLACES_DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";
const GMAIL_URL: &str = "https://gmail.googleapis.com/gmail/v1";
const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

static SHARED: Lazy<Config> = Lazy::new(Config::from_env);

/// Configuration for the running function, built on first use.
pub fn shared() -> &'static Config {
    &SHARED
}

/// Integrations a function may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    BusinessProfile,
    Places,
    SendGrid,
    Gmail,
}

/// OAuth client credentials plus a long-lived refresh token.
#[derive(Clone)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct SendGridSettings {
    pub api_key: String,
    pub from_email: String,
}

impl std::fmt::Debug for SendGridSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridSettings")
            .field("from_email", &self.from_email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct GmailSettings {
    pub credentials: OAuthCredentials,
    pub from_email: String,
}

/// Upstream base URLs.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub oauth_token: String,
    pub account_management: String,
    pub business_information: String,
    pub business_reviews: String,
    pub places_details: String,
    pub gmail: String,
    pub sendgrid_send: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            oauth_token: GOOGLE_TOKEN_URL.to_string(),
            account_management: ACCOUNT_MANAGEMENT_URL.to_string(),
            business_information: BUSINESS_INFORMATION_URL.to_string(),
            business_reviews: BUSINESS_REVIEWS_URL.to_string(),
            places_details: PLACES_DETAILS_URL.to_string(),
            gmail: GMAIL_URL.to_string(),
            sendgrid_send: SENDGRID_SEND_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Points every upstream at a single host, e.g. a local emulator.
    pub fn rooted_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            oauth_token: format!("{base}/token"),
            account_management: format!("{base}/accountmanagement/v1"),
            business_information: format!("{base}/businessinformation/v1"),
            business_reviews: format!("{base}/mybusiness/v4"),
            places_details: format!("{base}/maps/api/place/details/json"),
            gmail: format!("{base}/gmail/v1"),
            sendgrid_send: format!("{base}/v3/mail/send"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub business_profile: Option<OAuthCredentials>,
    pub places_api_key: Option<String>,
    pub sendgrid: Option<SendGridSettings>,
    pub gmail: Option<GmailSettings>,
    pub internal_email: Option<String>,
    pub endpoints: Endpoints,
}

impl Config {
    pub fn from_env() -> Self {
        let config = Self::from_lookup(|key| env::var(key).ok());
        tracing::info!(
            business_profile = config.is_configured(Service::BusinessProfile),
            places = config.is_configured(Service::Places),
            sendgrid = config.is_configured(Service::SendGrid),
            gmail = config.is_configured(Service::Gmail),
            internal_copy = config.internal_email.is_some(),
            "configuration loaded"
        );
        config
    }

    /// Builds a configuration from an arbitrary variable source. Blank values
    /// count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let credentials = |prefix: &str| {
            Some(OAuthCredentials {
                client_id: var(&format!("{prefix}_CLIENT_ID"))?,
                client_secret: var(&format!("{prefix}_CLIENT_SECRET"))?,
                refresh_token: var(&format!("{prefix}_REFRESH_TOKEN"))?,
            })
        };

        let from_email = var("FROM_EMAIL");

        Self {
            business_profile: credentials("GOOGLE"),
            places_api_key: var("GOOGLE_MAPS_API_KEY"),
            sendgrid: var("SENDGRID_API_KEY").zip(from_email.clone()).map(
                |(api_key, from_email)| SendGridSettings {
                    api_key,
                    from_email,
                },
            ),
            gmail: credentials("GMAIL")
                .zip(from_email)
                .map(|(credentials, from_email)| GmailSettings {
                    credentials,
                    from_email,
                }),
            internal_email: var("INTERNAL_EMAIL"),
            endpoints: Endpoints::default(),
        }
    }

    pub fn is_configured(&self, service: Service) -> bool {
        match service {
            Service::BusinessProfile => self.business_profile.is_some(),
            Service::Places => self.places_api_key.is_some(),
            Service::SendGrid => self.sendgrid.is_some(),
            Service::Gmail => self.gmail.is_some(),
        }
    }

    pub fn business_profile(&self) -> Result<&OAuthCredentials> {
        self.business_profile
            .as_ref()
            .ok_or_else(|| ApiError::configuration("Missing OAuth env vars"))
    }

    pub fn places_api_key(&self) -> Result<&str> {
        self.places_api_key
            .as_deref()
            .ok_or_else(|| ApiError::configuration("Missing GOOGLE_MAPS_API_KEY"))
    }

    pub fn sendgrid(&self) -> Result<&SendGridSettings> {
        self.sendgrid
            .as_ref()
            .ok_or_else(|| ApiError::configuration("Email not configured"))
    }

    pub fn gmail(&self) -> Result<&GmailSettings> {
        self.gmail
            .as_ref()
            .ok_or_else(|| ApiError::configuration("Gmail not configured"))
    }

    pub fn internal_email(&self) -> Option<&str> {
        self.internal_email.as_deref()
    }
}
