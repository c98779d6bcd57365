#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
};
use sfacg_sign::Config;
use sfacg_sign::config::{
    ENV_API_BASE, ENV_AUTHORIZATION, ENV_COOKIE_SESSION_APP, ENV_COOKIE_SF_COMMUNITY,
    ENV_DEVICE_TOKEN, ENV_NONCE, ENV_NTFY_BASE, ENV_NTFY_TOPIC, ENV_SIGN,
};

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: Method,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Captured {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("utf-8 body")
    }
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Arc<Mutex<Vec<Captured>>>,
}

/// Local HTTP server answering every request with a canned response.
pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Captured>>>,
    task: tokio::task::JoinHandle<()>,
}

impl MockServer {
    pub async fn start(status: u16, body: &str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    pub async fn start_with_delay(status: u16, body: &str, delay: Duration) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: body.to_string(),
            delay,
            requests: requests.clone(),
        };

        let app = Router::new().fallback(capture).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server addr");
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
            task,
        }
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn capture(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    state.requests.lock().expect("requests lock").push(Captured {
        method,
        path: uri.path().to_string(),
        headers,
        body: body.to_vec(),
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (state.status, state.body.clone())
}

/// Base URL that refuses connections.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{}", addr)
}

/// A complete environment pointing the platform and ntfy at local servers.
pub fn test_env(api_base: &str, ntfy_base: &str) -> HashMap<&'static str, String> {
    HashMap::from([
        (ENV_NONCE, "NONCE-1".to_string()),
        (ENV_DEVICE_TOKEN, "DEVICE-1".to_string()),
        (ENV_SIGN, "SIGN-1".to_string()),
        (ENV_AUTHORIZATION, "QVVUSA==".to_string()),
        (ENV_COOKIE_SF_COMMUNITY, "community".to_string()),
        (ENV_COOKIE_SESSION_APP, "session".to_string()),
        (ENV_NTFY_TOPIC, "sf-daily".to_string()),
        (ENV_API_BASE, api_base.to_string()),
        (ENV_NTFY_BASE, ntfy_base.to_string()),
    ])
}

pub fn config_from(env: &HashMap<&'static str, String>) -> Result<Config, sfacg_sign::ConfigError> {
    Config::from_lookup(|key| env.get(key).cloned())
}

pub fn test_config(api_base: &str, ntfy_base: &str) -> Config {
    config_from(&test_env(api_base, ntfy_base)).expect("complete test config")
}
