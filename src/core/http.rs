//! HTTP call helpers for the backend REST service.
//!
//! Each helper performs exactly one request, attaches the standard headers
//! and classifies the response: non-2xx statuses become [`HttpError::Status`]
//! carrying the status line and a snippet of the body, 2xx bodies are
//! returned as JSON (or as a JSON string when the backend answers with
//! plain text).

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use super::error::{Error, Result};
use super::runtime::RuntimeConfig;

/// Header carrying the admin token on mutating calls.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-api-token";

/// Maximum number of body characters quoted in a status error.
pub const ERROR_BODY_LIMIT: usize = 256;

/// Failures of a single backend call.
///
/// All of these are recoverable: the tools domain turns them into an error
/// envelope. A missing `SERVER_URL` is not an `HttpError`, see
/// [`BackendClient::url`].
#[derive(Debug, Error)]
pub enum HttpError {
    /// The backend answered with a non-2xx status.
    #[error("{}{}", status_line(.status, .reason), snippet_suffix(.snippet))]
    Status {
        status: u16,
        reason: String,
        snippet: Option<String>,
    },

    /// The request could not be sent or the body could not be read.
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// A 2xx body that should be JSON failed to parse.
    #[error("Invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// `"<code> <reason>"`, or just the code for non-standard statuses.
fn status_line(status: &u16, reason: &str) -> String {
    if reason.is_empty() {
        status.to_string()
    } else {
        format!("{status} {reason}")
    }
}

fn snippet_suffix(snippet: &Option<String>) -> String {
    snippet
        .as_deref()
        .map(|s| format!(": {s}"))
        .unwrap_or_default()
}

impl HttpError {
    /// Build a status error from the status code and the (possibly empty)
    /// response body.
    pub fn status(status: reqwest::StatusCode, body: &str) -> Self {
        let snippet = if body.is_empty() {
            None
        } else {
            Some(body.chars().take(ERROR_BODY_LIMIT).collect())
        };
        Self::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            snippet,
        }
    }
}

/// A client bound to one runtime configuration.
///
/// Cheap to construct: the underlying `reqwest::Client` is a shared
/// connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    runtime: RuntimeConfig,
}

impl BackendClient {
    pub fn new(http: Client, runtime: RuntimeConfig) -> Self {
        Self { http, runtime }
    }

    pub fn runtime(&self) -> &RuntimeConfig {
        &self.runtime
    }

    /// Build `<server_url>/<segments...>/` with a trailing slash.
    ///
    /// Each segment is percent-encoded as a single path component. Fails with
    /// a configuration error when the base URL is missing or unusable.
    pub fn url<S: AsRef<str>>(&self, segments: &[S]) -> Result<Url> {
        let base = self.runtime.server_url()?;
        let mut url = Url::parse(base)
            .map_err(|e| Error::config(format!("SERVER_URL '{base}' is not a valid URL: {e}")))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::config(format!("SERVER_URL '{base}' cannot be a base URL")))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment.as_ref());
            }
            path.push("");
        }
        Ok(url)
    }

    /// Headers sent with POST/PATCH by default.
    pub fn json_headers(&self) -> HeaderMap {
        let mut headers = self.admin_headers();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Headers sent with DELETE by default: the admin token only.
    pub fn admin_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        // A token that is not a valid header value is sent as empty.
        let token = HeaderValue::from_str(self.runtime.admin_api_token())
            .unwrap_or_else(|_| HeaderValue::from_static(""));
        headers.insert(HeaderName::from_static(ADMIN_TOKEN_HEADER), token);
        headers
    }

    /// GET a JSON document.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch_json(&self, url: Url) -> std::result::Result<Value, HttpError> {
        debug!("GET {}", url);
        let response = ensure_success(self.http.get(url).send().await?).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST `body` (or `{}`) as JSON with the default headers.
    pub async fn post_json(
        &self,
        url: Url,
        body: Option<&Value>,
    ) -> std::result::Result<Value, HttpError> {
        self.post_json_with_headers(url, body, self.json_headers())
            .await
    }

    /// POST `body` (or `{}`) with caller-supplied headers.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn post_json_with_headers(
        &self,
        url: Url,
        body: Option<&Value>,
        headers: HeaderMap,
    ) -> std::result::Result<Value, HttpError> {
        self.send_json(Method::POST, url, body, headers).await
    }

    /// PATCH `body` (or `{}`) as JSON with the default headers.
    pub async fn patch_json(
        &self,
        url: Url,
        body: Option<&Value>,
    ) -> std::result::Result<Value, HttpError> {
        self.patch_json_with_headers(url, body, self.json_headers())
            .await
    }

    /// PATCH `body` (or `{}`) with caller-supplied headers.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn patch_json_with_headers(
        &self,
        url: Url,
        body: Option<&Value>,
        headers: HeaderMap,
    ) -> std::result::Result<Value, HttpError> {
        self.send_json(Method::PATCH, url, body, headers).await
    }

    /// DELETE with the admin-token header and no body.
    pub async fn delete_request(&self, url: Url) -> std::result::Result<Value, HttpError> {
        self.delete_request_with_headers(url, self.admin_headers())
            .await
    }

    /// DELETE with caller-supplied headers and no body.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn delete_request_with_headers(
        &self,
        url: Url,
        headers: HeaderMap,
    ) -> std::result::Result<Value, HttpError> {
        debug!("DELETE {}", url);
        let response = self.http.delete(url).headers(headers).send().await?;
        read_sniffed(ensure_success(response).await?).await
    }

    async fn send_json(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
        headers: HeaderMap,
    ) -> std::result::Result<Value, HttpError> {
        debug!("{} {}", method, url);
        let payload = match body {
            Some(Value::Null) | None => "{}".to_string(),
            Some(value) => serde_json::to_string(value)?,
        };
        let response = self
            .http
            .request(method, url)
            .headers(headers)
            .body(payload)
            .send()
            .await?;
        read_sniffed(ensure_success(response).await?).await
    }
}

/// Pass 2xx responses through, turn anything else into a status error.
async fn ensure_success(response: Response) -> std::result::Result<Response, HttpError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(HttpError::status(status, &body))
}

/// Parse JSON when the backend says so, otherwise keep the raw text.
async fn read_sniffed(response: Response) -> std::result::Result<Value, HttpError> {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    let body = response.text().await?;
    if is_json && !body.trim().is_empty() {
        Ok(serde_json::from_str(&body)?)
    } else {
        Ok(Value::String(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server_url: &str, token: Option<&str>) -> BackendClient {
        BackendClient::new(
            Client::new(),
            RuntimeConfig::new(server_url, token.map(str::to_string)),
        )
    }

    #[test]
    fn test_status_error_without_reason_phrase() {
        let status = reqwest::StatusCode::from_u16(520).unwrap();
        assert_eq!(HttpError::status(status, "cf").to_string(), "520: cf");
        assert_eq!(HttpError::status(status, "").to_string(), "520");

        let not_found = HttpError::status(reqwest::StatusCode::NOT_FOUND, "");
        assert_eq!(not_found.to_string(), "404 Not Found");
    }

    #[test]
    fn test_url_appends_segments_with_trailing_slash() {
        let client = client_for("https://api.example.com", None);
        let url = client.url(&["api", "v1", "dopamart", "products"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/v1/dopamart/products/");
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client = client_for("https://api.example.com/prefix/", None);
        let url = client.url(&["api", "v1", "plans", "7"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/prefix/api/v1/plans/7/");
    }

    #[test]
    fn test_url_encodes_segment() {
        let client = client_for("https://api.example.com", None);
        let url = client.url(&["items", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/items/a%2Fb%20c/");
    }

    #[test]
    fn test_url_without_server_url_is_config_error() {
        let client = BackendClient::new(Client::new(), RuntimeConfig::default());
        let err = client.url(&["api"]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_url_with_invalid_server_url_is_config_error() {
        let client = client_for("not a url", None);
        assert!(matches!(client.url(&["api"]), Err(Error::Config(_))));
    }

    #[test]
    fn test_status_error_message() {
        let err = HttpError::status(reqwest::StatusCode::NOT_FOUND, "no such doctor");
        assert_eq!(err.to_string(), "404 Not Found: no such doctor");

        let err = HttpError::status(reqwest::StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.to_string(), "502 Bad Gateway");
    }

    #[test]
    fn test_status_error_truncates_body() {
        let body = "x".repeat(1000);
        let err = HttpError::status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, &body);
        let expected = format!("500 Internal Server Error: {}", "x".repeat(ERROR_BODY_LIMIT));
        assert_eq!(err.to_string(), expected);
    }

    #[tokio::test]
    async fn test_fetch_json_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/mindfulness/tracks/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), None);
        let url = client.url(&["api", "v1", "mindfulness", "tracks"]).unwrap();
        let value = client.fetch_json(url).await.unwrap();
        assert_eq!(value, json!([{"id": 1}]));
    }

    #[tokio::test]
    async fn test_fetch_json_rejects_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), None);
        let url = client.url(&["anything"]).unwrap();
        let err = client.fetch_json(url).await.unwrap_err();
        assert!(matches!(err, HttpError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_json_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden here"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), None);
        let url = client.url(&["anything"]).unwrap();
        let err = client.fetch_json(url).await.unwrap_err();
        assert_eq!(err.to_string(), "403 Forbidden: forbidden here");
    }

    #[tokio::test]
    async fn test_post_json_sends_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/dopamart/products/"))
            .and(header("content-type", "application/json"))
            .and(header("x-admin-api-token", "secret"))
            .and(body_json(json!({"name": "X"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 5})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Some("secret"));
        let url = client.url(&["api", "v1", "dopamart", "products"]).unwrap();
        let value = client
            .post_json(url, Some(&json!({"name": "X"})))
            .await
            .unwrap();
        assert_eq!(value, json!({"id": 5}));
    }

    #[tokio::test]
    async fn test_post_json_defaults_to_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), None);
        let url = client.url(&["things"]).unwrap();
        client.post_json(url, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_patch_json_returns_text_for_non_json() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/plain")
                    .set_body_string("updated"),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Some("secret"));
        let url = client.url(&["things", "1"]).unwrap();
        let value = client.patch_json(url, Some(&json!({"a": 1}))).await.unwrap();
        assert_eq!(value, Value::String("updated".to_string()));
    }

    #[tokio::test]
    async fn test_delete_request_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/things/1/"))
            .and(header("x-admin-api-token", "secret"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Some("secret"));
        let url = client.url(&["things", "1"]).unwrap();
        let value = client.delete_request(url).await.unwrap();
        assert_eq!(value, Value::String(String::new()));
    }

    #[tokio::test]
    async fn test_delete_request_with_custom_headers() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(header("x-custom", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), None);
        let url = client.url(&["things", "1"]).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("x-custom", HeaderValue::from_static("1"));
        let value = client
            .delete_request_with_headers(url, headers)
            .await
            .unwrap();
        assert_eq!(value, json!({"deleted": 1}));
    }
}
