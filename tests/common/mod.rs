#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};
use vercel_runtime::{Body, Request, Response};
use widget_functions::config::{
    Config, Endpoints, GmailSettings, OAuthCredentials, SendGridSettings,
};

pub const GBP_ACCESS_TOKEN: &str = "gbp-access";
pub const GMAIL_ACCESS_TOKEN: &str = "gmail-access";

/// Every integration configured and pointed at `server`.
pub fn full_config(server: &MockServer) -> Config {
    Config {
        business_profile: Some(OAuthCredentials {
            client_id: "gbp-client".to_string(),
            client_secret: "gbp-secret".to_string(),
            refresh_token: "gbp-refresh".to_string(),
        }),
        places_api_key: Some("maps-key".to_string()),
        sendgrid: Some(SendGridSettings {
            api_key: "SG.test".to_string(),
            from_email: "hello@tanlounge.test".to_string(),
        }),
        gmail: Some(GmailSettings {
            credentials: OAuthCredentials {
                client_id: "gmail-client".to_string(),
                client_secret: "gmail-secret".to_string(),
                refresh_token: "gmail-refresh".to_string(),
            },
            from_email: "hello@tanlounge.test".to_string(),
        }),
        internal_email: None,
        endpoints: Endpoints::rooted_at(&server.base_url()),
    }
}

pub async fn mock_token<'a>(server: &'a MockServer, refresh_token: &str, access_token: &str) -> Mock<'a> {
    let refresh_param = format!("refresh_token={refresh_token}");
    let access_token = access_token.to_string();
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/token")
                .body_contains("grant_type=refresh_token")
                .body_contains(&refresh_param);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({ "access_token": access_token, "expires_in": 3599, "token_type": "Bearer" }));
        })
        .await
}

pub fn get(uri: &str) -> Request {
    request(http::Method::GET, uri, Body::Empty)
}

pub fn post_json(uri: &str, body: &Value) -> Request {
    request(http::Method::POST, uri, Body::Text(body.to_string()))
}

pub fn request(method: http::Method, uri: &str, body: Body) -> Request {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap()
}

pub fn body_text(response: &Response<Body>) -> String {
    match response.body() {
        Body::Empty => String::new(),
        Body::Text(text) => text.clone(),
        Body::Binary(bytes) => String::from_utf8(bytes.clone()).unwrap(),
    }
}

pub fn body_json(response: &Response<Body>) -> Value {
    serde_json::from_str(&body_text(response)).unwrap()
}

pub fn header<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}
