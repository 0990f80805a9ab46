//! GET /api/health: version and configured integrations. Makes no upstream
//! calls.

use crate::config::{Config, Service};
use crate::endpoint::EndpointPolicy;
use crate::error::ApiError;
use crate::version;
use serde_json::json;
use vercel_runtime::{Body, Error, Request, Response};

pub fn policy() -> EndpointPolicy {
    EndpointPolicy {
        allow_methods: "GET,OPTIONS",
        required_method: None,
        cache_control: Some("no-store"),
        pretty: false,
    }
}

pub async fn handle(req: Request, config: &Config) -> std::result::Result<Response<Body>, Error> {
    policy()
        .respond(req, |_| async move {
            Ok::<_, ApiError>(json!({
                "status": "ok",
                "version": version(),
                "services": {
                    "business_profile": config.is_configured(Service::BusinessProfile),
                    "places": config.is_configured(Service::Places),
                    "sendgrid": config.is_configured(Service::SendGrid),
                    "gmail": config.is_configured(Service::Gmail),
                    "internal_copy": config.internal_email().is_some(),
                },
            }))
        })
        .await
}
