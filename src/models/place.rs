use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Places Details never exposes more than five reviews; the widget shows at
/// most that many.
pub const MAX_PLACE_REVIEWS: usize = 5;

/// `result` member of a Places Details response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub reviews: Vec<PlaceDetailsReview>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetailsReview {
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub profile_photo_url: Option<String>,
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub relative_time_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlaceSummary {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub total: Option<u64>,
    pub url: Option<String>,
    pub reviews: Vec<PlaceReview>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlaceReview {
    pub author: Option<String>,
    pub avatar: Option<String>,
    pub rating: Option<Value>,
    pub text: Option<String>,
    pub when: Option<String>,
}

impl From<PlaceDetailsReview> for PlaceReview {
    fn from(review: PlaceDetailsReview) -> Self {
        PlaceReview {
            author: review.author_name,
            avatar: review.profile_photo_url,
            rating: review.rating,
            text: review.text,
            when: review.relative_time_description,
        }
    }
}

impl From<PlaceDetails> for PlaceSummary {
    fn from(details: PlaceDetails) -> Self {
        PlaceSummary {
            name: details.name,
            rating: details.rating,
            total: details.user_ratings_total,
            url: details.url,
            reviews: details
                .reviews
                .into_iter()
                .take(MAX_PLACE_REVIEWS)
                .map(PlaceReview::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_keeps_at_most_five_reviews() {
        let reviews: Vec<Value> = (1..=8)
            .map(|i| json!({ "author_name": format!("Author {i}"), "rating": 5 }))
            .collect();
        let details: PlaceDetails = serde_json::from_value(json!({
            "name": "Tan Lounge",
            "rating": 4.9,
            "user_ratings_total": 212,
            "url": "https://maps.google.com/?cid=1",
            "reviews": reviews
        }))
        .unwrap();

        let summary = PlaceSummary::from(details);
        assert_eq!(summary.reviews.len(), MAX_PLACE_REVIEWS);
        assert_eq!(summary.reviews[4].author.as_deref(), Some("Author 5"));
        assert_eq!(summary.total, Some(212));
    }

    #[test]
    fn test_review_is_remapped_to_widget_fields() {
        let review: PlaceDetailsReview = serde_json::from_value(json!({
            "author_name": "Priya",
            "profile_photo_url": "https://img/p.png",
            "rating": 4,
            "text": "Great",
            "relative_time_description": "a week ago",
            "time": 1700000000
        }))
        .unwrap();

        let value = serde_json::to_value(PlaceReview::from(review)).unwrap();
        assert_eq!(
            value,
            json!({
                "author": "Priya",
                "avatar": "https://img/p.png",
                "rating": 4,
                "text": "Great",
                "when": "a week ago"
            })
        );
    }

    #[test]
    fn test_missing_reviews_yield_empty_list() {
        let details: PlaceDetails = serde_json::from_value(json!({ "name": "Quiet Place" })).unwrap();
        assert!(PlaceSummary::from(details).reviews.is_empty());
    }
}
