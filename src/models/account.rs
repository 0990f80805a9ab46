use serde::{Deserialize, Serialize};

/// A Business Profile account with the first page of its locations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: String,
    pub account_name: String,
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub title: Option<String>,
    /// Upstream resource name, e.g. `accounts/123/locations/456`.
    pub location_name: String,
    pub account_id: String,
    pub location_id: String,
    pub store_code: Option<String>,
}

/// Second segment of an `accounts/{id}` resource name.
pub fn account_id_from_name(name: &str) -> String {
    name.split('/').nth(1).unwrap_or_default().to_string()
}

/// Splits a location resource name into `(account_id, location_id)`.
///
/// The long form `accounts/{a}/locations/{l}` carries both ids. The short
/// form `locations/{l}` only names the location, so the listing account's id
/// is used.
pub fn location_ids(name: &str, listing_account_id: &str) -> (String, String) {
    let segments: Vec<&str> = name.split('/').collect();
    match segments.as_slice() {
        ["accounts", account, "locations", location, ..] => {
            (account.to_string(), location.to_string())
        }
        ["locations", location, ..] => (listing_account_id.to_string(), location.to_string()),
        _ => (
            segments.get(1).copied().unwrap_or_default().to_string(),
            segments.get(3).copied().unwrap_or_default().to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_is_second_segment() {
        assert_eq!(account_id_from_name("accounts/1234567890"), "1234567890");
        assert_eq!(account_id_from_name("accounts"), "");
    }

    #[test]
    fn test_long_location_name_carries_both_ids() {
        assert_eq!(
            location_ids("accounts/111/locations/222", "999"),
            ("111".to_string(), "222".to_string())
        );
    }

    #[test]
    fn test_short_location_name_uses_listing_account() {
        assert_eq!(
            location_ids("locations/222", "999"),
            ("999".to_string(), "222".to_string())
        );
    }

    #[test]
    fn test_location_serializes_in_camel_case_with_null_store_code() {
        let location = Location {
            title: Some("Tan Lounge Paddington".to_string()),
            location_name: "accounts/1/locations/2".to_string(),
            account_id: "1".to_string(),
            location_id: "2".to_string(),
            store_code: None,
        };
        let value = serde_json::to_value(&location).unwrap();
        assert_eq!(value["locationName"], "accounts/1/locations/2");
        assert_eq!(value["locationId"], "2");
        assert!(value["storeCode"].is_null());
    }
}
