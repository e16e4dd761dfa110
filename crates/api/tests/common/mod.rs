#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::Response;
use axum::routing;
use axum::{Json, Router};
use crm_api::app::build_app;
use crm_api::config::ServerConfig;
use crm_api::state::AppState;
use crm_client::ApiClient;
use crm_core::roles::Role;
use crm_core::session::{BearerToken, SessionProfile};
use crm_session::{MemoryStorage, SessionStore, DEFAULT_SESSION_TTL_DAYS};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Build a test `ServerConfig` pointing at `upstream_url`.
pub fn test_config(upstream_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upstream_url: upstream_url.to_string(),
        upstream_timeout_secs: 5,
        session_file: ".unused-test-session.json".into(),
        session_ttl_days: DEFAULT_SESSION_TTL_DAYS,
    }
}

/// A console wired to an in-memory session store.
pub struct TestConsole {
    pub app: Router,
    pub session: Arc<SessionStore>,
    pub storage: MemoryStorage,
}

pub fn build_test_console(upstream_url: &str) -> TestConsole {
    let storage = MemoryStorage::new();
    let session = Arc::new(SessionStore::open(
        storage.clone(),
        chrono::Duration::days(DEFAULT_SESSION_TTL_DAYS),
    ));
    let config = test_config(upstream_url);
    let upstream = ApiClient::new(upstream_url, Duration::from_secs(5))
        .expect("client should build");

    let state = AppState {
        config: Arc::new(config),
        session: Arc::clone(&session),
        upstream,
    };

    TestConsole {
        app: build_app(state),
        session,
        storage,
    }
}

pub fn profile(role: Role) -> SessionProfile {
    SessionProfile {
        id: "u1".into(),
        name: "Amy".into(),
        email: "a@x.com".into(),
        role,
        token: BearerToken::new("tok123"),
    }
}

// ---------------------------------------------------------------------------
// Fake upstream CRM API
// ---------------------------------------------------------------------------

async fn upstream_login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let role = match (body["email"].as_str(), body["password"].as_str()) {
        (Some("a@x.com"), Some("secret")) => "admin",
        (Some("agent@x.com"), Some("secret")) => "agent",
        (Some("odd@x.com"), Some("secret")) => "owner",
        _ => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Invalid email or password" })),
            )
        }
    };
    (
        StatusCode::OK,
        Json(json!({
            "user": { "id": "u1", "name": "Amy", "email": body["email"], "role": role },
            "token": "tok123"
        })),
    )
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("authorization").and_then(|v| v.to_str().ok()) == Some("Bearer tok123")
}

async fn upstream_collection(name: &'static str, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if authorized(&headers) {
        (StatusCode::OK, Json(json!([{ "id": 1, "kind": name }])))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Token expired" })))
    }
}

/// Spawn the fake upstream on an ephemeral port and return its base URL.
pub async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/api/auth/login", routing::post(upstream_login))
        .route("/api/leads", routing::get(|h: HeaderMap| upstream_collection("lead", h)))
        .route("/api/users", routing::get(|h: HeaderMap| upstream_collection("user", h)))
        .route("/api/products", routing::get(|h: HeaderMap| upstream_collection("product", h)))
        .route("/api/orders", routing::get(|h: HeaderMap| upstream_collection("order", h)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

/// Base URL nobody listens on.
pub async fn dead_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get("location")
        .expect("redirect should carry a Location header")
        .to_str()
        .unwrap()
}
