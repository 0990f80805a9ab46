//! Authenticated JSON client for Google REST APIs.

use crate::error::{ApiError, Result};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;
use url::Url;

pub struct GoogleClient {
    client: Client,
    access_token: String,
}

impl GoogleClient {
    pub fn new(client: Client, access_token: String) -> Self {
        Self {
            client,
            access_token,
        }
    }

    /// Authenticated GET returning the decoded JSON body whatever the status.
    ///
    /// Google APIs report failures as `{"error": {...}}`; callers decide
    /// whether that is fatal. Transport failures and non-JSON bodies are
    /// [`ApiError::Unexpected`].
    pub async fn get(&self, url: Url, query: &[(&str, &str)]) -> Result<Value> {
        let builder = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(&self.access_token);
        read_json(builder).await
    }

    /// Authenticated POST with a JSON body.
    pub async fn post(&self, url: Url, body: &Value) -> Result<Value> {
        let builder = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(body);
        read_json(builder).await
    }
}

async fn read_json(builder: RequestBuilder) -> Result<Value> {
    let response = builder.send().await?;
    let status = response.status();
    debug!(status = status.as_u16(), "google api response");

    let body = response.text().await?;
    if body.trim().is_empty() {
        if status.is_success() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        return Err(ApiError::unexpected(format!("HTTP {status} with empty body")));
    }

    serde_json::from_str(&body).map_err(|e| {
        ApiError::unexpected(format!("Failed to parse response (HTTP {status}): {e}"))
    })
}

/// Returns the body unchanged unless it carries an `error` member, in which
/// case it becomes [`ApiError::Upstream`].
pub fn reject_error_body(body: Value) -> Result<Value> {
    if body.get("error").is_some() {
        return Err(ApiError::Upstream(body));
    }
    Ok(body)
}

/// Appends percent-encoded path segments to a base URL.
pub fn resource_url(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| ApiError::unexpected(format!("Invalid upstream URL {base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::unexpected(format!("Upstream URL cannot be a base: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
