use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_AUTHOR: &str = "Google User";
const REVIEW_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// A Business Profile review as the v4 API returns it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReview {
    #[serde(default)]
    pub reviewer: Option<Reviewer>,
    /// Normally a `StarRating` enum name; other shapes rate as 0.
    #[serde(default)]
    pub star_rating: Option<Value>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reviewer {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub profile_photo_url: Option<String>,
}

/// Widget-facing review shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub author_name: String,
    pub profile_photo_url: String,
    pub rating: u8,
    pub relative_time_description: String,
    pub text: String,
    /// The v4 API does not expose a profile URL per review.
    pub author_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewSummary {
    pub name: String,
    /// Mean rating with one decimal, e.g. `"4.7"`.
    pub rating: String,
    pub user_ratings_total: usize,
    pub reviews: Vec<Review>,
}

impl ReviewSummary {
    pub fn new(name: String, reviews: Vec<Review>) -> Self {
        Self {
            name,
            rating: average_rating(&reviews),
            user_ratings_total: reviews.len(),
            reviews,
        }
    }
}

/// Maps the `starRating` enum to 1-5. Anything else is 0.
pub fn star_rating_value(star_rating: Option<&str>) -> u8 {
    match star_rating {
        Some("ONE") => 1,
        Some("TWO") => 2,
        Some("THREE") => 3,
        Some("FOUR") => 4,
        Some("FIVE") => 5,
        _ => 0,
    }
}

/// Calendar date of an RFC 3339 timestamp in UTC, `M/D/YYYY`. Unparseable
/// input renders as an empty string.
pub fn review_date(create_time: Option<&str>) -> String {
    create_time
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|parsed| parsed.with_timezone(&Utc).format(REVIEW_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

impl From<RawReview> for Review {
    fn from(raw: RawReview) -> Self {
        let reviewer = raw.reviewer.unwrap_or_default();
        Review {
            author_name: reviewer
                .display_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            profile_photo_url: reviewer.profile_photo_url.unwrap_or_default(),
            rating: star_rating_value(raw.star_rating.as_ref().and_then(Value::as_str)),
            relative_time_description: review_date(raw.create_time.as_deref()),
            text: raw.comment.unwrap_or_default(),
            author_url: String::new(),
        }
    }
}

/// Mean of the ratings rounded half-up to one decimal, `"0.0"` when empty.
pub fn average_rating(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return "0.0".to_string();
    }
    let sum: u64 = reviews.iter().map(|r| u64::from(r.rating)).sum();
    let count = reviews.len() as u64;
    // Half-up in integer tenths: 4.25 becomes 4.3.
    let tenths = (sum * 20 + count) / (count * 2);
    format!("{}.{}", tenths / 10, tenths % 10)
}
