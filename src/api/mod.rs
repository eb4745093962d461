//! Request client shared by every endpoint facade.
//!
//! All calls go through [`ApiClient::send`]: the absolute URL is `base + endpoint`,
//! the cookie store always carries the backend session, the body is decoded as JSON
//! and any non-success status is normalized into [`ApiError`]. JSON and multipart
//! bodies share the same normalization; only the body encoding and the fallback
//! message differ.

pub mod admin;
pub mod advertisements;
pub mod auth;
pub mod experts;
pub mod items;
pub mod matching;
pub mod panels;
pub mod pdf;

use std::path::Path;

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError, ClientResult, GENERIC_FAILURE};

pub use admin::Admin;
pub use advertisements::Advertisements;
pub use auth::Auth;
pub use experts::Experts;
pub use items::Items;
pub use matching::Matching;
pub use panels::Panels;
pub use pdf::Pdf;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Body encoding strategy for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Json(Value),
    Multipart(UploadFile),
}

/// A document sent as the single `file` part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = guess_mime(&file_name);
        Self { file_name, bytes, mime }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(name, bytes))
    }

    fn into_form(self) -> ClientResult<reqwest::multipart::Form> {
        let mut part = reqwest::multipart::Part::bytes(self.bytes).file_name(self.file_name);
        if let Some(m) = self.mime.as_deref() {
            part = part.mime_str(m)?;
        }
        Ok(reqwest::multipart::Form::new().part("file", part))
    }
}

fn guess_mime(name: &str) -> Option<String> {
    let ext = name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase())?;
    match ext.as_str() {
        "pdf" => Some("application/pdf".into()),
        "txt" => Some("text/plain".into()),
        _ => None,
    }
}

/// Fully specified request: what a facade method constructs.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: String,
    pub headers: HeaderMap,
    pub payload: Payload,
    /// Message used when a failed response has no `error` field.
    pub fallback: &'static str,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            headers: HeaderMap::new(),
            payload: Payload::Empty,
            fallback: GENERIC_FAILURE,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self { Self::new(Method::GET, endpoint) }
    pub fn post(endpoint: impl Into<String>) -> Self { Self::new(Method::POST, endpoint) }
    pub fn put(endpoint: impl Into<String>) -> Self { Self::new(Method::PUT, endpoint) }
    pub fn delete(endpoint: impl Into<String>) -> Self { Self::new(Method::DELETE, endpoint) }

    pub fn json(mut self, body: Value) -> Self {
        self.payload = Payload::Json(body);
        self
    }

    /// Serialize a typed body. Serialization of the derive-based bodies in this crate cannot fail.
    pub fn body<T: Serialize>(self, body: &T) -> Self {
        let v = serde_json::to_value(body).unwrap_or(Value::Null);
        self.json(v)
    }

    pub fn multipart(mut self, file: UploadFile, fallback: &'static str) -> Self {
        self.payload = Payload::Multipart(file);
        self.fallback = fallback;
        self
    }
}

/// Caller overrides for the generic `request` entry point.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Plain `{ "message": ... }` acknowledgement returned by mutation endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

/// Success bodies are decoded before the status is inspected; a failure body must still be JSON.
pub fn normalize_response(status: StatusCode, body: &[u8], fallback: &str) -> ClientResult<Value> {
    let data: Value = serde_json::from_slice(body)?;
    if !status.is_success() {
        return Err(ApiError::from_body(status.as_u16(), &data, fallback).into());
    }
    Ok(data)
}

pub(crate) fn with_query(path: &str, key: &str, value: Option<&str>) -> String {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => format!("{}?{}={}", path, key, urlencoding::encode(v)),
        None => path.to_string(),
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        // No timeout: a request that never resolves leaves its caller waiting.
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { base: config.base_url.clone(), http })
    }

    pub fn base_url(&self) -> &str { &self.base }

    pub fn url(&self, endpoint: &str) -> String { format!("{}{}", self.base, endpoint) }

    /// Generic entry: GET unless overridden; a body is sent as JSON.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> ClientResult<Value> {
        let mut req = ApiRequest::new(options.method.unwrap_or(Method::GET), endpoint);
        req.headers = options.headers;
        if let Some(body) = options.body {
            req = req.json(body);
        }
        self.send(req).await
    }

    pub async fn request_as<T: DeserializeOwned>(&self, endpoint: &str, options: RequestOptions) -> ClientResult<T> {
        let mut req = ApiRequest::new(options.method.unwrap_or(Method::GET), endpoint);
        req.headers = options.headers;
        if let Some(body) = options.body {
            req = req.json(body);
        }
        self.send_as(req).await
    }

    pub async fn send(&self, req: ApiRequest) -> ClientResult<Value> {
        let method = req.method.clone();
        let endpoint = req.endpoint.clone();
        let result = self.exchange(req).await;
        match &result {
            Ok(_) => debug!(target: "mira::api", %method, %endpoint, "request ok"),
            Err(e) => error!(target: "mira::api", %method, %endpoint, code = e.code_str(), error = %e, "API Error"),
        }
        result
    }

    /// `send` followed by typed decoding; a shape mismatch is logged as a decode failure.
    pub async fn send_as<T: DeserializeOwned>(&self, req: ApiRequest) -> ClientResult<T> {
        let method = req.method.clone();
        let endpoint = req.endpoint.clone();
        let value = self.send(req).await?;
        serde_json::from_value(value).map_err(|e| {
            error!(target: "mira::api", %method, %endpoint, code = "decode_error", error = %e, "API Error");
            ClientError::Decode(e)
        })
    }

    async fn exchange(&self, req: ApiRequest) -> ClientResult<Value> {
        let url = self.url(&req.endpoint);
        let mut builder = self.http.request(req.method, url);
        builder = match req.payload {
            Payload::Empty => builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE),
            Payload::Json(body) => builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(serde_json::to_vec(&body)?),
            Payload::Multipart(file) => builder.multipart(file.into_form()?),
        };
        // Caller headers replace the defaults key by key.
        builder = builder.headers(req.headers);
        let resp = builder.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        normalize_response(status, &bytes, req.fallback)
    }

    pub fn auth(&self) -> Auth<'_> { Auth::new(self) }
    pub fn advertisements(&self) -> Advertisements<'_> { Advertisements::new(self) }
    pub fn items(&self) -> Items<'_> { Items::new(self) }
    pub fn experts(&self) -> Experts<'_> { Experts::new(self) }
    pub fn panels(&self) -> Panels<'_> { Panels::new(self) }
    pub fn pdf(&self) -> Pdf<'_> { Pdf::new(self) }
    pub fn matching(&self) -> Matching<'_> { Matching::new(self) }
    pub fn admin(&self) -> Admin<'_> { Admin::new(self) }

    pub async fn seed_database(&self) -> ClientResult<Value> { self.admin().seed_database().await }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base", &self.base).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UPLOAD_FAILURE;
    use serde_json::json;

    #[test]
    fn success_body_is_returned() {
        let v = normalize_response(StatusCode::OK, br#"{"items":[1,2]}"#, GENERIC_FAILURE).unwrap();
        assert_eq!(v, json!({"items": [1, 2]}));
        let v = normalize_response(StatusCode::CREATED, b"[]", GENERIC_FAILURE).unwrap();
        assert_eq!(v, json!([]));
    }

    #[test]
    fn failure_uses_error_field_or_fallback() {
        let err = normalize_response(StatusCode::NOT_FOUND, br#"{"error":"Item not found"}"#, GENERIC_FAILURE).unwrap_err();
        assert_eq!(err.as_api(), Some(&ApiError::new(404, "Item not found")));
        let err = normalize_response(StatusCode::BAD_REQUEST, br#"{"message":"nope"}"#, GENERIC_FAILURE).unwrap_err();
        assert_eq!(err.message(), "API request failed");
        let err = normalize_response(StatusCode::BAD_REQUEST, b"{}", UPLOAD_FAILURE).unwrap_err();
        assert_eq!(err.message(), "Upload failed");
    }

    #[test]
    fn malformed_body_is_a_decode_error_even_on_failure_status() {
        let err = normalize_response(StatusCode::OK, b"<html>oops</html>", GENERIC_FAILURE).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
        let err = normalize_response(StatusCode::BAD_GATEWAY, b"Bad Gateway", GENERIC_FAILURE).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn query_values_are_optional_and_encoded() {
        assert_eq!(with_query("/items", "status", None), "/items");
        assert_eq!(with_query("/items", "status", Some("")), "/items");
        assert_eq!(with_query("/items", "status", Some("open")), "/items?status=open");
        assert_eq!(with_query("/experts", "category", Some("RF & Radar")), "/experts?category=RF%20%26%20Radar");
    }

    #[test]
    fn url_is_plain_concatenation() {
        let cfg = ClientConfig::new("http://127.0.0.1:5001/api").unwrap();
        let client = ApiClient::new(&cfg).unwrap();
        assert_eq!(client.url("/auth/me"), "http://127.0.0.1:5001/api/auth/me");
        assert_eq!(client.base_url(), "http://127.0.0.1:5001/api");
    }

    #[test]
    fn upload_file_guesses_pdf_mime() {
        let f = UploadFile::new("advert_2024.PDF", vec![1, 2, 3]);
        assert_eq!(f.mime.as_deref(), Some("application/pdf"));
        assert_eq!(UploadFile::new("blob", vec![]).mime, None);
    }
}
