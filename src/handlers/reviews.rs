//! GET /api/gbp-reviews: every review of one Business Profile location,
//! normalized for the widget, with an average rating.

use crate::config::Config;
use crate::endpoint::{query_params, EndpointPolicy};
use crate::error::{ApiError, Result};
use crate::google::oauth::exchange_refresh_token;
use crate::google::{BusinessProfileApi, GoogleClient};
use crate::models::review::ReviewSummary;
use crate::pagination::Paginator;
use reqwest::Client;
use serde_json::Value;
use tracing::info;
use vercel_runtime::{Body, Error, Request, Response};

pub const DEFAULT_MAX_REVIEWS: usize = 200;
pub const MAX_REVIEWS_CAP: usize = 500;

pub fn policy() -> EndpointPolicy {
    EndpointPolicy {
        allow_methods: "GET,OPTIONS",
        required_method: None,
        cache_control: Some("public, max-age=600"),
        pretty: false,
    }
}

pub async fn handle(req: Request, config: &Config) -> std::result::Result<Response<Body>, Error> {
    policy().respond(req, |req| location_reviews(req, config)).await
}

/// Reads the `max` query value. Absent or blank means the default. The
/// leading integer is used (`"12abc"` is 12) and clamped to `0..=500`; a value
/// that does not start with digits is rejected.
pub fn parse_max(raw: Option<&str>) -> Result<usize> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_MAX_REVIEWS),
        Some(value) => leading_integer(value)
            .map(|n| n.clamp(0, MAX_REVIEWS_CAP as i64) as usize)
            .ok_or_else(|| ApiError::validation("Invalid max parameter")),
    }
}

/// Optional sign followed by digits, saturating instead of overflowing.
fn leading_integer(value: &str) -> Option<i64> {
    let (negative, rest) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

async fn location_reviews(req: Request, config: &Config) -> Result<Value> {
    let credentials = config.business_profile()?;

    let params = query_params(&req);
    let account_id = params.get("accountId").map(|v| v.trim()).unwrap_or_default();
    let location_id = params.get("locationId").map(|v| v.trim()).unwrap_or_default();
    if account_id.is_empty() || location_id.is_empty() {
        return Err(ApiError::validation("Missing accountId or locationId"));
    }
    let max = parse_max(params.get("max").map(String::as_str))?;

    let client = Client::new();
    let access_token =
        exchange_refresh_token(&client, &config.endpoints.oauth_token, credentials).await?;
    let api = BusinessProfileApi::new(GoogleClient::new(client, access_token), &config.endpoints);

    let name = api.location_title(account_id, location_id).await?;
    let reviews = Paginator::new(api.review_pages(account_id, location_id), max)
        .collect()
        .await?;

    let summary = ReviewSummary::new(name, reviews);
    info!(
        account_id,
        location_id,
        max,
        returned = summary.user_ratings_total,
        rating = %summary.rating,
        "collected reviews"
    );

    Ok(serde_json::to_value(summary)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_defaults_when_absent_or_blank() {
        assert_eq!(parse_max(None).unwrap(), 200);
        assert_eq!(parse_max(Some("  ")).unwrap(), 200);
    }

    #[test]
    fn test_max_is_clamped() {
        assert_eq!(parse_max(Some("3")).unwrap(), 3);
        assert_eq!(parse_max(Some("500")).unwrap(), 500);
        assert_eq!(parse_max(Some("9000")).unwrap(), 500);
        assert_eq!(parse_max(Some("-5")).unwrap(), 0);
    }

    #[test]
    fn test_huge_max_saturates_to_cap() {
        assert_eq!(parse_max(Some("99999999999999999999")).unwrap(), 500);
        assert_eq!(parse_max(Some("-99999999999999999999")).unwrap(), 0);
    }

    #[test]
    fn test_leading_integer_is_used() {
        assert_eq!(parse_max(Some("12abc")).unwrap(), 12);
        assert_eq!(parse_max(Some("1.5")).unwrap(), 1);
        assert_eq!(parse_max(Some("+7")).unwrap(), 7);
    }

    #[test]
    fn test_non_numeric_max_is_rejected() {
        for raw in ["abc", "NaN", "-", "+x", ".5"] {
            let err = parse_max(Some(raw)).unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)), "{raw} should be rejected");
        }
    }
}
