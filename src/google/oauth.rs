//! Refresh-token exchange against Google's OAuth2 token endpoint.

use crate::config::OAuthCredentials;
use crate::error::{ApiError, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

/// Trades the long-lived refresh token for a short-lived access token.
pub async fn exchange_refresh_token(
    client: &Client,
    token_url: &str,
    credentials: &OAuthCredentials,
) -> Result<String> {
    debug!("exchanging refresh token");

    let params = [
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
        ("refresh_token", credentials.refresh_token.as_str()),
        ("grant_type", "refresh_token"),
    ];

    let response = client.post(token_url).form(&params).send().await?;
    let status = response.status();
    let body = response.text().await?;

    let parsed: Value = serde_json::from_str(&body).map_err(|e| {
        ApiError::unexpected(format!("Invalid token response (HTTP {status}): {e}"))
    })?;
    parse_token_response(&parsed)
}

fn parse_token_response(parsed: &Value) -> Result<String> {
    if let Some(err) = parsed.get("error").and_then(|v| v.as_str()) {
        let desc = parsed
            .get("error_description")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown error");
        error!("token exchange rejected: {}", err);
        return Err(ApiError::unexpected(format!("{err}: {desc}")));
    }

    parsed
        .get("access_token")
        .and_then(|v| v.as_str())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::unexpected("Missing access_token in token response"))
}
