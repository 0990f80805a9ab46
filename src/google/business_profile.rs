//! Google Business Profile: account management v1, business information v1
//! and the v4 reviews listing.

use super::client::{reject_error_body, resource_url, GoogleClient};
use crate::config::Endpoints;
use crate::error::Result;
use crate::models::account::{account_id_from_name, location_ids, Account, Location};
use crate::models::review::{RawReview, Review};
use crate::pagination::{Page, PageSource};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

const LOCATIONS_PAGE_SIZE: &str = "100";
const LOCATIONS_READ_MASK: &str = "name,title,storeCode";
pub const REVIEWS_PAGE_SIZE: &str = "50";
const DEFAULT_LOCATION_TITLE: &str = "Google Reviews";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountsResponse {
    #[serde(default)]
    accounts: Vec<RawAccount>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAccount {
    #[serde(default)]
    name: String,
    #[serde(default)]
    account_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationsResponse {
    #[serde(default)]
    locations: Vec<RawLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLocation {
    #[serde(default)]
    name: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    store_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewsResponse {
    #[serde(default)]
    reviews: Vec<RawReview>,
    #[serde(default)]
    next_page_token: Option<String>,
}

pub struct BusinessProfileApi<'a> {
    client: GoogleClient,
    endpoints: &'a Endpoints,
}

impl<'a> BusinessProfileApi<'a> {
    pub fn new(client: GoogleClient, endpoints: &'a Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Every account the credentials can see, each with its first page of
    /// locations. Locations are fetched one account at a time.
    pub async fn accounts_with_locations(&self) -> Result<Vec<Account>> {
        let url = resource_url(&self.endpoints.account_management, &["accounts"])?;
        let body = reject_error_body(self.client.get(url, &[]).await?)?;
        let listing: AccountsResponse = serde_json::from_value(body)?;
        debug!(count = listing.accounts.len(), "listed accounts");

        let mut accounts = Vec::with_capacity(listing.accounts.len());
        for raw in listing.accounts {
            let account_id = account_id_from_name(&raw.name);
            let locations = self.locations(&account_id).await?;
            accounts.push(Account {
                account_name: raw.account_name.unwrap_or(raw.name),
                account_id,
                locations,
            });
        }
        Ok(accounts)
    }

    /// First page of an account's locations. A response without a
    /// `locations` list, an error body included, reads as no locations.
    pub async fn locations(&self, account_id: &str) -> Result<Vec<Location>> {
        let url = resource_url(
            &self.endpoints.business_information,
            &["accounts", account_id, "locations"],
        )?;
        let body = self
            .client
            .get(
                url,
                &[("pageSize", LOCATIONS_PAGE_SIZE), ("readMask", LOCATIONS_READ_MASK)],
            )
            .await?;

        if body.get("error").is_some() {
            warn!(account_id, "location listing failed, treating as empty");
            return Ok(Vec::new());
        }

        let listing: LocationsResponse = serde_json::from_value(body)?;
        Ok(listing
            .locations
            .into_iter()
            .map(|raw| {
                let (parsed_account, location_id) = location_ids(&raw.name, account_id);
                Location {
                    title: raw.title,
                    location_name: raw.name,
                    account_id: parsed_account,
                    location_id,
                    store_code: raw.store_code.filter(|code| !code.is_empty()),
                }
            })
            .collect())
    }

    /// Display title of a location, or a generic heading when the response
    /// has none.
    pub async fn location_title(&self, account_id: &str, location_id: &str) -> Result<String> {
        let url = resource_url(
            &self.endpoints.business_information,
            &["accounts", account_id, "locations", location_id],
        )?;
        let body = self.client.get(url, &[("readMask", "title")]).await?;

        Ok(body
            .get("title")
            .and_then(|v| v.as_str())
            .filter(|title| !title.is_empty())
            .unwrap_or(DEFAULT_LOCATION_TITLE)
            .to_string())
    }

    /// One page of a location's reviews, already normalized.
    pub async fn reviews_page(
        &self,
        account_id: &str,
        location_id: &str,
        page_token: Option<&str>,
    ) -> Result<Page<Review>> {
        let url = resource_url(
            &self.endpoints.business_reviews,
            &["accounts", account_id, "locations", location_id, "reviews"],
        )?;

        let mut query = vec![("pageSize", REVIEWS_PAGE_SIZE)];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let body = reject_error_body(self.client.get(url, &query).await?)?;
        let page: ReviewsResponse = serde_json::from_value(body)?;

        Ok(Page {
            items: page.reviews.into_iter().map(Review::from).collect(),
            next_page_token: page.next_page_token,
        })
    }

    pub fn review_pages<'b>(&'b self, account_id: &'b str, location_id: &'b str) -> ReviewPages<'b> {
        ReviewPages {
            api: self,
            account_id,
            location_id,
        }
    }
}

/// Reviews of one location as a [`PageSource`].
pub struct ReviewPages<'b> {
    api: &'b BusinessProfileApi<'b>,
    account_id: &'b str,
    location_id: &'b str,
}

#[async_trait]
impl PageSource for ReviewPages<'_> {
    type Item = Review;

    async fn fetch_page(&self, page_token: Option<&str>) -> Result<Page<Review>> {
        self.api
            .reviews_page(self.account_id, self.location_id, page_token)
            .await
    }
}
