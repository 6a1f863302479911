//! Shared fixtures: a config pointed at mock Gumroad/Keygen servers and request helpers.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode},
    routing::post,
};
use httpmock::{Mock, prelude::*};
use serde_json::{Value, json};
use tower::ServiceExt;

use fulfillment::config::Config;
use fulfillment::handlers;
use fulfillment::state::AppState;

pub const ACCOUNT_ID: &str = "test-account";
pub const PRODUCT_ID: &str = "test-product";
pub const POLICY_ID: &str = "test-policy";
pub const GUMROAD_TOKEN: &str = "gumroad-token";
pub const KEYGEN_TOKEN: &str = "prod-keygen-token";

pub const MAC_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";
pub const WINDOWS_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const LINUX_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";

pub fn test_config(gumroad: &MockServer, keygen: &MockServer) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        gumroad_access_token: GUMROAD_TOKEN.to_string(),
        keygen_product_token: KEYGEN_TOKEN.to_string(),
        keygen_account_id: ACCOUNT_ID.to_string(),
        keygen_product_id: PRODUCT_ID.to_string(),
        keygen_policy_id: POLICY_ID.to_string(),
        gumroad_api_url: gumroad.base_url(),
        keygen_api_url: keygen.base_url(),
        keygen_dist_url: fulfillment::config::DEFAULT_KEYGEN_DIST_URL.to_string(),
    }
}

pub fn test_app(gumroad: &MockServer, keygen: &MockServer) -> Router {
    handlers::app(AppState::new(&test_config(gumroad, keygen)))
}

/// Send a GET through the router and return status and body text.
pub async fn get(app: Router, uri: &str, user_agent: Option<&str>) -> (StatusCode, String) {
    let mut request = Request::builder().method("GET").uri(uri);
    if let Some(ua) = user_agent {
        request = request.header("user-agent", ua);
    }

    send(app, request.body(Body::empty()).unwrap()).await
}

/// Like [`get`], with a raw `user-agent` value that need not be visible ASCII.
pub async fn get_with_raw_user_agent(
    app: Router,
    uri: &str,
    user_agent: &[u8],
) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("user-agent", HeaderValue::from_bytes(user_agent).unwrap())
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub fn mock_sale<'a>(server: &'a MockServer, sale_id: &str) -> Mock<'a> {
    let path = format!("/v2/sales/{}", sale_id);
    let sale_id = sale_id.to_string();
    server.mock(|when, then| {
        when.method(GET)
            .path(path)
            .query_param("access_token", GUMROAD_TOKEN);
        then.status(200).json_body(json!({
            "success": true,
            "sale": {
                "id": sale_id,
                "email": "buyer@example.com",
                "product_name": "Desktop App"
            }
        }));
    })
}

pub fn mock_sale_status<'a>(server: &'a MockServer, sale_id: &str, status: u16) -> Mock<'a> {
    let path = format!("/v2/sales/{}", sale_id);
    server.mock(|when, then| {
        when.method(GET).path(path);
        then.status(status)
            .json_body(json!({"success": false, "message": "The sale was not found."}));
    })
}

pub fn licenses_path() -> String {
    format!("/v1/accounts/{}/licenses", ACCOUNT_ID)
}

pub fn mock_license_created<'a>(server: &'a MockServer, key: &str) -> Mock<'a> {
    let key = key.to_string();
    server.mock(|when, then| {
        when.method(POST)
            .path(licenses_path())
            .header("authorization", format!("Bearer {}", KEYGEN_TOKEN));
        then.status(201).json_body(json!({
            "data": {
                "id": "license-1",
                "type": "licenses",
                "attributes": {
                    "key": key,
                    "status": "ACTIVE",
                    "expiry": null,
                    "metadata": {"gumroadSaleId": "123", "gumroadProductId": "456"}
                },
                "relationships": {
                    "policy": {"data": {"type": "policies", "id": POLICY_ID}}
                }
            }
        }));
    })
}

pub fn mock_license_errors<'a>(server: &'a MockServer, detail: &str) -> Mock<'a> {
    let detail = detail.to_string();
    server.mock(|when, then| {
        when.method(POST).path(licenses_path());
        then.status(422).json_body(json!({
            "errors": [{"title": "Unprocessable resource", "detail": detail}]
        }));
    })
}

pub fn expected_link(platform: &str, key: &str) -> String {
    format!(
        "https://dist.keygen.sh/v1/{}/{}/latest/{}/zip?key={}&policy={}",
        ACCOUNT_ID, PRODUCT_ID, platform, key, POLICY_ID
    )
}

/// Keygen stand-in that records every submitted license document and echoes
/// the submitted key back as the created license.
pub struct RecordingKeygen {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<Value>>>,
}

impl RecordingKeygen {
    pub async fn start() -> Self {
        let requests: Arc<Mutex<Vec<Value>>> = Arc::default();

        let app = Router::new()
            .route(&licenses_path(), post(echo_license))
            .with_state(requests.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// `data.attributes.key` of every request received so far.
    pub fn submitted_keys(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|doc| doc["data"]["attributes"]["key"].as_str().unwrap().to_string())
            .collect()
    }
}

async fn echo_license(
    State(requests): State<Arc<Mutex<Vec<Value>>>>,
    Json(document): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let key = document["data"]["attributes"]["key"].clone();
    let count = {
        let mut requests = requests.lock().unwrap();
        requests.push(document);
        requests.len()
    };

    (
        StatusCode::CREATED,
        Json(json!({
            "data": {
                "id": format!("license-{}", count),
                "type": "licenses",
                "attributes": {"key": key, "status": "ACTIVE", "metadata": {}},
                "relationships": {
                    "policy": {"data": {"type": "policies", "id": POLICY_ID}}
                }
            }
        })),
    )
}

pub fn is_license_key_format(key: &str) -> bool {
    let groups: Vec<&str> = key.split('-').collect();
    groups.len() == 4
        && groups.iter().all(|g| {
            g.len() == 4 && g.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        })
}
