//! GET /api/gbp-list: Business Profile accounts and their locations.

use crate::config::Config;
use crate::endpoint::EndpointPolicy;
use crate::error::Result;
use crate::google::oauth::exchange_refresh_token;
use crate::google::{BusinessProfileApi, GoogleClient};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;
use vercel_runtime::{Body, Error, Request, Response};

pub fn policy() -> EndpointPolicy {
    EndpointPolicy {
        allow_methods: "GET,OPTIONS",
        required_method: None,
        cache_control: Some("public, max-age=300"),
        pretty: true,
    }
}

pub async fn handle(req: Request, config: &Config) -> std::result::Result<Response<Body>, Error> {
    policy().respond(req, |_| list_accounts(config)).await
}

async fn list_accounts(config: &Config) -> Result<Value> {
    let credentials = config.business_profile()?;

    let client = Client::new();
    let access_token =
        exchange_refresh_token(&client, &config.endpoints.oauth_token, credentials).await?;
    let api = BusinessProfileApi::new(GoogleClient::new(client, access_token), &config.endpoints);

    let accounts = api.accounts_with_locations().await?;
    info!(
        accounts = accounts.len(),
        locations = accounts.iter().map(|a| a.locations.len()).sum::<usize>(),
        "listed business profile accounts"
    );

    Ok(json!({ "accounts": accounts }))
}
