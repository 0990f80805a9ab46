//! Request helpers and the response conventions every endpoint follows:
//! permissive CORS, JSON bodies, optional cache headers and a single place
//! where [`ApiError`] turns into a status code.

use crate::error::{ApiError, Result};
use http::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use vercel_runtime::{Body, Error, Request, Response, StatusCode};

/// Per-endpoint response policy.
#[derive(Debug, Clone)]
pub struct EndpointPolicy {
    /// Methods advertised in preflight responses.
    pub allow_methods: &'static str,
    /// When set, any other non-OPTIONS method is answered with 405.
    pub required_method: Option<Method>,
    /// Sent with successful responses only; errors are never cacheable.
    pub cache_control: Option<&'static str>,
    pub pretty: bool,
}

impl EndpointPolicy {
    /// Runs `handle` unless the request is a preflight or uses a method the
    /// endpoint rejects, and renders the outcome.
    pub async fn respond<F, Fut>(&self, req: Request, handle: F) -> std::result::Result<Response<Body>, Error>
    where
        F: FnOnce(Request) -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        if *req.method() == Method::OPTIONS {
            return self.preflight();
        }

        if let Some(required) = &self.required_method {
            if req.method() != required {
                tracing::info!(method = %req.method(), "rejecting method");
                return self.error(&ApiError::MethodNotAllowed);
            }
        }

        match handle(req).await {
            Ok(payload) => self.json(StatusCode::OK, &payload),
            Err(err) => {
                if err.status().is_server_error() {
                    tracing::error!(status = err.status().as_u16(), "request failed: {}", err);
                } else {
                    tracing::info!(status = err.status().as_u16(), "request rejected: {}", err);
                }
                self.error(&err)
            }
        }
    }

    pub fn preflight(&self) -> std::result::Result<Response<Body>, Error> {
        Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", self.allow_methods)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)?)
    }

    pub fn error(&self, err: &ApiError) -> std::result::Result<Response<Body>, Error> {
        self.json(err.status(), &err.body())
    }

    pub fn json(&self, status: StatusCode, payload: &Value) -> std::result::Result<Response<Body>, Error> {
        let text = if self.pretty {
            serde_json::to_string_pretty(payload)?
        } else {
            payload.to_string()
        };

        let mut builder = Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .header("Access-Control-Allow-Origin", "*");
        if let Some(cache_control) = self.cache_control.filter(|_| status.is_success()) {
            builder = builder.header("Cache-Control", cache_control);
        }

        Ok(builder.body(Body::Text(text))?)
    }
}

/// Decoded query-string parameters. Repeated keys keep the first value.
pub fn query_params(req: &Request) -> HashMap<String, String> {
    let mut params = HashMap::new();
    if let Some(query) = req.uri().query() {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
    }
    params
}

/// Request body as UTF-8 text; an absent body reads as an empty string.
pub fn body_text(req: &Request) -> Result<String> {
    match req.body() {
        Body::Empty => Ok(String::new()),
        Body::Text(text) => Ok(text.clone()),
        Body::Binary(bytes) => String::from_utf8(bytes.clone())
            .map_err(|_| ApiError::unexpected("Request body is not valid UTF-8")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn policy() -> EndpointPolicy {
        EndpointPolicy {
            allow_methods: "GET,OPTIONS",
            required_method: Some(Method::GET),
            cache_control: Some("public, max-age=600"),
            pretty: false,
        }
    }

    fn request(method: Method, uri: &str) -> Request {
        http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::Empty)
            .unwrap()
    }

    fn text(response: &Response<Body>) -> String {
        match response.body() {
            Body::Text(text) => text.clone(),
            Body::Empty => String::new(),
            Body::Binary(bytes) => String::from_utf8(bytes.clone()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_preflight_short_circuits_handler() {
        let flag = AtomicBool::new(false);
        let called = &flag;
        let response = policy()
            .respond(request(Method::OPTIONS, "https://x.test/api"), move |_| async move {
                called.store(true, Ordering::SeqCst);
                Ok::<_, ApiError>(json!({}))
            })
            .await
            .unwrap();

        assert!(!flag.load(Ordering::SeqCst));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text(&response), "");
        assert_eq!(response.headers()["Access-Control-Allow-Methods"], "GET,OPTIONS");
        assert!(response.headers().get("Cache-Control").is_none());
    }

    #[tokio::test]
    async fn test_wrong_method_is_rejected_before_handler() {
        let flag = AtomicBool::new(false);
        let called = &flag;
        let response = policy()
            .respond(request(Method::DELETE, "https://x.test/api"), move |_| async move {
                called.store(true, Ordering::SeqCst);
                Ok::<_, ApiError>(json!({}))
            })
            .await
            .unwrap();

        assert!(!flag.load(Ordering::SeqCst));
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(text(&response), r#"{"error":"Method not allowed"}"#);
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
    }

    #[tokio::test]
    async fn test_errors_render_with_their_status() {
        let response = policy()
            .respond(request(Method::GET, "https://x.test/api"), |_| async {
                Err::<Value, _>(ApiError::Upstream(json!({ "error": { "code": 404 } })))
            })
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(text(&response), r#"{"error":{"code":404}}"#);
        assert!(response.headers().get("Cache-Control").is_none());
    }

    #[tokio::test]
    async fn test_success_carries_cache_header() {
        let response = policy()
            .respond(request(Method::GET, "https://x.test/api"), |_| async {
                Ok::<_, ApiError>(json!({ "ok": true }))
            })
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Cache-Control"], "public, max-age=600");
    }

    #[test]
    fn test_query_params_are_decoded() {
        let req = request(Method::GET, "https://x.test/api?placeId=ChIJ%2Babc&sort=newest&sort=old");
        let params = query_params(&req);
        assert_eq!(params["placeId"], "ChIJ+abc");
        assert_eq!(params["sort"], "newest");
    }

    #[test]
    fn test_missing_query_yields_no_params() {
        let req = request(Method::GET, "https://x.test/api");
        assert!(query_params(&req).is_empty());
    }
}
