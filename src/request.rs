//! Per-request context: reconstructs the current URL, merges query
//! parameters, and exposes submitted form fields.
//!
//! `RequestContext` is a plain owned snapshot so helpers stay testable
//! without a server. Inside an axum handler it is used as an extractor; the
//! form is read only from `application/x-www-form-urlencoded` bodies.

use axum::{
  async_trait,
  extract::{FromRequest, Request},
  http::{header, request::Parts, uri::Authority, HeaderMap, StatusCode},
};
use tracing::debug;
use url::{form_urlencoded, Url};

/// Upper bound on form bodies read by the extractor.
const FORM_BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
  pub https: bool,
  pub server_name: String,
  /// `None` when the request did not carry an explicit port.
  pub server_port: Option<u16>,
  /// Path plus optional `?query`, as received.
  pub request_uri: String,
  pub query: Vec<(String, String)>,
  pub form: Vec<(String, String)>,
}

impl RequestContext {
  /// Build a context from scheme, host and request URI. The query pairs are
  /// parsed out of `request_uri`.
  pub fn new(https: bool, server_name: impl Into<String>, request_uri: impl Into<String>) -> Self {
    let request_uri = request_uri.into();
    let query = match request_uri.split_once('?') {
      Some((_, qs)) => parse_pairs(qs.as_bytes()),
      None => Vec::new(),
    };
    Self {
      https,
      server_name: server_name.into(),
      server_port: None,
      request_uri,
      query,
      form: Vec::new(),
    }
  }

  pub fn with_port(mut self, port: u16) -> Self {
    self.server_port = Some(port);
    self
  }

  pub fn with_form(mut self, form: Vec<(String, String)>) -> Self {
    self.form = form;
    self
  }

  /// Snapshot everything except the body from request parts.
  pub fn from_parts(parts: &Parts) -> Self {
    let authority = parts
      .headers
      .get(header::HOST)
      .and_then(|h| h.to_str().ok())
      .and_then(|h| h.parse::<Authority>().ok())
      .or_else(|| parts.uri.authority().cloned());

    let https = parts.uri.scheme_str() == Some("https") || forwarded_https(&parts.headers);
    let request_uri = parts
      .uri
      .path_and_query()
      .map(|pq| pq.as_str().to_string())
      .unwrap_or_else(|| "/".to_string());

    let mut ctx = Self::new(
      https,
      authority.as_ref().map(|a| a.host().to_string()).unwrap_or_default(),
      request_uri,
    );
    ctx.server_port = authority.as_ref().and_then(|a| a.port_u16());
    ctx
  }

  fn default_port(&self) -> u16 {
    if self.https { 443 } else { 80 }
  }

  /// Absolute URL of the current request.
  ///
  /// With `show_port`, the port is appended unless it is absent or the
  /// scheme default. With `remove_params`, everything from `?` is dropped.
  pub fn current_url(&self, show_port: bool, remove_params: bool) -> String {
    let scheme = if self.https { "https" } else { "http" };
    let mut url = format!("{scheme}://{}", self.server_name);
    if show_port {
      match self.server_port {
        Some(port) if port != self.default_port() => url.push_str(&format!(":{port}")),
        _ => {}
      }
    }
    let uri = if remove_params {
      self.request_uri.split_once('?').map_or(self.request_uri.as_str(), |(path, _)| path)
    } else {
      self.request_uri.as_str()
    };
    url.push_str(uri);
    url
  }

  /// Host of the current request with one leading `www.` removed.
  pub fn domain(&self) -> Option<String> {
    let url = Url::parse(&self.current_url(false, false)).ok()?;
    let host = url.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
  }

  /// Current URL with `params` merged into its query string.
  ///
  /// A key that already exists is removed and re-appended with the new
  /// value, so overridden and new keys end up last, in merge order.
  pub fn add_url_param<K, V>(&self, params: impl IntoIterator<Item = (K, V)>) -> String
  where
    K: Into<String>,
    V: Into<String>,
  {
    let mut merged = self.query.clone();
    for (key, value) in params {
      let key = key.into();
      merged.retain(|(existing, _)| *existing != key);
      merged.push((key, value.into()));
    }

    let query = form_urlencoded::Serializer::new(String::new())
      .extend_pairs(merged.iter())
      .finish();
    let base = self.current_url(false, true);
    if query.is_empty() { base } else { format!("{base}?{query}") }
  }

  /// Value of a submitted form field, if any.
  pub fn post_var(&self, name: &str) -> Option<&str> {
    lookup(&self.form, name)
  }

  /// Value of a query parameter, if any.
  pub fn query_var(&self, name: &str) -> Option<&str> {
    lookup(&self.query, name)
  }
}

#[async_trait]
impl<S> FromRequest<S> for RequestContext
where
  S: Send + Sync,
{
  type Rejection = (StatusCode, String);

  async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
    let (parts, body) = req.into_parts();
    let mut ctx = Self::from_parts(&parts);

    if is_form_body(&parts.headers) {
      let bytes = axum::body::to_bytes(body, FORM_BODY_LIMIT)
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("unreadable form body: {e}")))?;
      ctx.form = parse_pairs(&bytes);
    }

    debug!(
      target: "webutils::request",
      host = %ctx.server_name,
      port = ?ctx.server_port,
      https = ctx.https,
      query_len = ctx.query.len(),
      form_len = ctx.form.len(),
      "Request context extracted"
    );
    Ok(ctx)
  }
}

fn lookup<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
  pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
}

fn parse_pairs(raw: &[u8]) -> Vec<(String, String)> {
  form_urlencoded::parse(raw).into_owned().collect()
}

fn forwarded_https(headers: &HeaderMap) -> bool {
  headers
    .get("x-forwarded-proto")
    .and_then(|v| v.to_str().ok())
    .map(|v| v.eq_ignore_ascii_case("https"))
    .unwrap_or(false)
}

fn is_form_body(headers: &HeaderMap) -> bool {
  headers
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .map(|v| v.starts_with("application/x-www-form-urlencoded"))
    .unwrap_or(false)
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::body::Body;

  fn ctx() -> RequestContext {
    RequestContext::new(false, "www.example.com", "/shop/list?page=2&sort=asc")
  }

  #[test]
  fn current_url_with_and_without_params() {
    let c = ctx();
    assert_eq!(c.current_url(false, false), "http://www.example.com/shop/list?page=2&sort=asc");
    assert_eq!(c.current_url(false, true), "http://www.example.com/shop/list");
  }

  #[test]
  fn current_url_port_handling() {
    assert_eq!(ctx().current_url(true, true), "http://www.example.com/shop/list");
    assert_eq!(ctx().with_port(80).current_url(true, true), "http://www.example.com/shop/list");
    assert_eq!(
      ctx().with_port(8080).current_url(true, true),
      "http://www.example.com:8080/shop/list"
    );
    assert_eq!(ctx().with_port(8080).current_url(false, true), "http://www.example.com/shop/list");

    let secure = RequestContext::new(true, "example.com", "/").with_port(443);
    assert_eq!(secure.current_url(true, false), "https://example.com/");
  }

  #[test]
  fn current_url_without_query_string() {
    let c = RequestContext::new(true, "example.com", "/plain");
    assert_eq!(c.current_url(false, true), "https://example.com/plain");
    assert_eq!(c.current_url(false, false), "https://example.com/plain");
  }

  #[test]
  fn domain_strips_only_leading_www() {
    assert_eq!(ctx().domain().as_deref(), Some("example.com"));
    let sub = RequestContext::new(false, "api.www.example.com", "/");
    assert_eq!(sub.domain().as_deref(), Some("api.www.example.com"));
    let shop = RequestContext::new(false, "shop.example.com", "/");
    assert_eq!(shop.domain().as_deref(), Some("shop.example.com"));
  }

  #[test]
  fn add_url_param_overrides_and_appends() {
    let url = ctx().add_url_param([("page", "3"), ("q", "red shoes")]);
    assert_eq!(url, "http://www.example.com/shop/list?sort=asc&page=3&q=red+shoes");
  }

  #[test]
  fn add_url_param_without_existing_query() {
    let c = RequestContext::new(false, "example.com", "/search");
    assert_eq!(c.add_url_param([("q", "rust")]), "http://example.com/search?q=rust");
    assert_eq!(c.add_url_param(Vec::<(String, String)>::new()), "http://example.com/search");
  }

  #[test]
  fn post_var_reads_form_and_misses_quietly() {
    let c = ctx().with_form(vec![("name".into(), "Ann".into())]);
    assert_eq!(c.post_var("name"), Some("Ann"));
    assert_eq!(c.post_var("missing"), None);
    assert_eq!(c.query_var("page"), Some("2"));
  }

  #[tokio::test]
  async fn extractor_reads_host_port_and_form() {
    let req = axum::http::Request::builder()
      .method("POST")
      .uri("/signup?ref=mail")
      .header(header::HOST, "www.example.com:8080")
      .header("x-forwarded-proto", "https")
      .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
      .body(Body::from("name=Ann+Lee&email=ann%40example.com"))
      .unwrap();

    let c = RequestContext::from_request(req, &()).await.unwrap();
    assert!(c.https);
    assert_eq!(c.server_name, "www.example.com");
    assert_eq!(c.server_port, Some(8080));
    assert_eq!(c.query_var("ref"), Some("mail"));
    assert_eq!(c.post_var("name"), Some("Ann Lee"));
    assert_eq!(c.post_var("email"), Some("ann@example.com"));
    assert_eq!(c.current_url(true, false), "https://www.example.com:8080/signup?ref=mail");
  }

  #[tokio::test]
  async fn extractor_ignores_non_form_bodies() {
    let req = axum::http::Request::builder()
      .method("POST")
      .uri("/api")
      .header(header::HOST, "example.com")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(r#"{"name":"Ann"}"#))
      .unwrap();

    let c = RequestContext::from_request(req, &()).await.unwrap();
    assert!(c.form.is_empty());
    assert_eq!(c.server_port, None);
  }
}
