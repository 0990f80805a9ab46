//! GET /api/places-reviews: up to five reviews from Places Details.

use crate::config::Config;
use crate::endpoint::{query_params, EndpointPolicy};
use crate::error::{ApiError, Result};
use crate::google::places::DEFAULT_REVIEW_SORT;
use crate::google::PlacesApi;
use crate::models::place::PlaceSummary;
use http::Method;
use reqwest::Client;
use serde_json::Value;
use tracing::info;
use vercel_runtime::{Body, Error, Request, Response};

pub fn policy() -> EndpointPolicy {
    EndpointPolicy {
        allow_methods: "GET,OPTIONS",
        required_method: Some(Method::GET),
        cache_control: Some("public, max-age=600"),
        pretty: false,
    }
}

pub async fn handle(req: Request, config: &Config) -> std::result::Result<Response<Body>, Error> {
    policy().respond(req, |req| place_reviews(req, config)).await
}

async fn place_reviews(req: Request, config: &Config) -> Result<Value> {
    let api_key = config.places_api_key()?;

    let params = query_params(&req);
    let place_id = params
        .get("placeId")
        .map(String::as_str)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::validation("Missing placeId"))?;
    let sort = params
        .get("sort")
        .map(String::as_str)
        .filter(|sort| !sort.is_empty())
        .unwrap_or(DEFAULT_REVIEW_SORT);

    let api = PlacesApi::new(Client::new(), &config.endpoints.places_details, api_key);
    let summary = PlaceSummary::from(api.details(place_id, sort).await?);
    info!(place_id, reviews = summary.reviews.len(), "fetched place reviews");

    Ok(serde_json::to_value(summary)?)
}
