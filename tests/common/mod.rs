//! In-process stand-in for the MIRA backend. Every request is recorded; responses
//! come from canned `(method, path)` entries, defaulting to `200 {"ok":true}`.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::task::JoinHandle;

use mira::{ApiClient, ClientConfig};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> Value { serde_json::from_slice(&self.body).unwrap_or(Value::Null) }

    pub fn header(&self, name: &str) -> Option<String> {
        self.headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
    }

    pub fn body_text(&self) -> String { String::from_utf8_lossy(&self.body).into_owned() }
}

#[derive(Debug, Clone)]
struct Canned {
    status: u16,
    body: Vec<u8>,
    set_cookie: Option<String>,
}

#[derive(Default)]
struct MockState {
    requests: Mutex<Vec<Recorded>>,
    routes: Mutex<HashMap<(String, String), Canned>>,
}

pub struct MockBackend {
    pub base: String,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(record_and_reply).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind mock backend");
        let addr = listener.local_addr().expect("mock addr");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self { base: format!("http://{}/api", addr), state, handle }
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    pub fn respond_raw(&self, method: &str, path: &str, status: u16, body: &str) {
        self.insert(method, path, Canned { status, body: body.as_bytes().to_vec(), set_cookie: None });
    }

    pub fn respond_with_cookie(&self, method: &str, path: &str, body: Value, cookie: &str) {
        self.insert(
            method,
            path,
            Canned { status: 200, body: body.to_string().into_bytes(), set_cookie: Some(cookie.to_string()) },
        );
    }

    fn insert(&self, method: &str, path: &str, c: Canned) {
        self.state.routes.lock().insert((method.to_string(), format!("/api{}", path)), c);
    }

    pub fn requests(&self) -> Vec<Recorded> { self.state.requests.lock().clone() }

    pub fn last(&self) -> Recorded {
        self.state.requests.lock().last().cloned().expect("no request recorded")
    }

    pub fn client(&self) -> ApiClient {
        let cfg = ClientConfig::new(self.base.clone()).expect("mock base url");
        ApiClient::new(&cfg).expect("client")
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) { self.handle.abort(); }
}

async fn record_and_reply(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        headers,
        body: body.to_vec(),
    });
    let canned = state.routes.lock().get(&(method.to_string(), path)).cloned();
    let c = canned.unwrap_or(Canned { status: 200, body: br#"{"ok":true}"#.to_vec(), set_cookie: None });
    let status = StatusCode::from_u16(c.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut resp = (status, c.body).into_response();
    resp.headers_mut().insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(cookie) = c.set_cookie {
        if let Ok(v) = HeaderValue::from_str(&cookie) {
            resp.headers_mut().insert(header::SET_COOKIE, v);
        }
    }
    resp
}
