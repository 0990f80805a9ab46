//! Places Details lookup for a single place.

use crate::error::{ApiError, Result};
use crate::models::place::PlaceDetails;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const DETAIL_FIELDS: &str = "name,rating,user_ratings_total,url,reviews";
pub const DEFAULT_REVIEW_SORT: &str = "most_relevant";

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    result: Option<PlaceDetails>,
}

pub struct PlacesApi<'a> {
    client: Client,
    details_url: &'a str,
    api_key: &'a str,
}

impl<'a> PlacesApi<'a> {
    pub fn new(client: Client, details_url: &'a str, api_key: &'a str) -> Self {
        Self {
            client,
            details_url,
            api_key,
        }
    }

    /// Fetches name, rating, total, URL and reviews for `place_id`.
    ///
    /// Any status other than `OK`, or a missing `result`, is reported as
    /// `{"error": "API error", "detail": <status or "NO_RESULT">}`.
    pub async fn details(&self, place_id: &str, sort: &str) -> Result<PlaceDetails> {
        debug!(place_id, sort, "places details lookup");

        let response = self
            .client
            .get(self.details_url)
            .query(&[
                ("place_id", place_id),
                ("fields", DETAIL_FIELDS),
                ("reviews_sort", sort),
                ("key", self.api_key),
            ])
            .send()
            .await?;
        let parsed: DetailsResponse = response.json().await?;

        match (parsed.status.as_deref(), parsed.result) {
            (Some("OK"), Some(result)) => Ok(result),
            (status, _) => Err(ApiError::Upstream(json!({
                "error": "API error",
                "detail": status.unwrap_or("NO_RESULT"),
            }))),
        }
    }
}
