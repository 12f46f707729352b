//! Router assembly: HTTP endpoints, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - REST-ish API under `/api/v1/...`
/// - CORS (allow any origin/method/headers) – adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/url", get(http::http_get_url))
        .route("/api/v1/url/with", post(http::http_post_url_with))
        .route("/api/v1/redirect", get(http::http_get_redirect))
        .route("/api/v1/form/:field", post(http::http_post_form_field))
        .route("/api/v1/key", get(http::http_get_key))
        .route("/api/v1/days", get(http::http_get_days))
        .route("/api/v1/weekdays", get(http::http_get_weekdays))
        .route("/api/v1/format", get(http::http_get_format))
        .route("/api/v1/debug", get(http::http_get_debug))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;
    use webutils::config::AppConfig;

    fn app() -> Router {
        build_router(Arc::new(AppState::new(AppConfig::default())))
    }

    async fn body_string(res: axum::response::Response) -> String {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn get_json(uri: &str, host: &str) -> Value {
        let res = app()
            .oneshot(Request::get(uri).header(header::HOST, host).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        serde_json::from_str(&body_string(res).await).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let v = get_json("/api/v1/health", "localhost").await;
        assert_eq!(v["ok"], true);
    }

    #[tokio::test]
    async fn url_endpoint_reconstructs_request() {
        let v = get_json("/api/v1/url?page=2", "www.example.com:8080").await;
        assert_eq!(v["current"], "http://www.example.com/api/v1/url?page=2");
        assert_eq!(v["with_port"], "http://www.example.com:8080/api/v1/url?page=2");
        assert_eq!(v["without_params"], "http://www.example.com/api/v1/url");
        assert_eq!(v["domain"], "example.com");
    }

    #[tokio::test]
    async fn url_with_merges_form_fields_into_query() {
        let res = app()
            .oneshot(
                Request::post("/api/v1/url/with?page=1&sort=asc")
                    .header(header::HOST, "example.com")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("page=5"))
                    .unwrap(),
            )
            .await
            .unwrap();
        let v: Value = serde_json::from_str(&body_string(res).await).unwrap();
        assert_eq!(v["url"], "http://example.com/api/v1/url/with?sort=asc&page=5");
    }

    #[tokio::test]
    async fn form_field_present_and_missing() {
        let post = |field: &str| {
            Request::post(format!("/api/v1/form/{field}"))
                .header(header::HOST, "example.com")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("email=ann%40example.com"))
                .unwrap()
        };

        let v: Value = serde_json::from_str(&body_string(app().oneshot(post("email")).await.unwrap()).await).unwrap();
        assert_eq!(v["value"], "ann@example.com");

        let v: Value = serde_json::from_str(&body_string(app().oneshot(post("name")).await.unwrap()).await).unwrap();
        assert!(v["value"].is_null());
    }

    #[tokio::test]
    async fn redirect_page_uses_configured_default_timeout() {
        let res = app()
            .oneshot(
                Request::get("/api/v1/redirect?to=%2Fhome&msg=Saved")
                    .header(header::HOST, "example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_string(res).await;
        assert!(html.contains("Saved<br />"));
        assert!(html.contains(r#"window.location = "/home";},2000);"#));
    }

    #[tokio::test]
    async fn key_days_weekdays_and_format() {
        let v = get_json("/api/v1/key?length=16", "localhost").await;
        assert_eq!(v["key"].as_str().unwrap().len(), 16);

        let v = get_json("/api/v1/days?from=172800&to=0", "localhost").await;
        assert_eq!(v["days_between"], 2);

        let v = get_json("/api/v1/weekdays", "localhost").await;
        assert_eq!(v["days"][0], "Monday");

        let v = get_json("/api/v1/format?amount=1234.5&text=abcdefghij&max=5", "localhost").await;
        assert_eq!(v["amount"], "1,234.50");
        assert_eq!(v["short"], "abcde...");
    }

    #[tokio::test]
    async fn debug_page_dumps_context() {
        let res = app()
            .oneshot(Request::get("/api/v1/debug?x=1").header(header::HOST, "example.com").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_string(res).await;
        assert!(html.contains("<pre>RequestContext {"));
        assert!(html.contains(r#"class="debug panel""#));
    }
}
