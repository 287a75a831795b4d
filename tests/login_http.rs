//! Sign-in and bearer calls against a local fake of the booking backend.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use voyage_admin::auth::{AuthError, HttpAuthTransport, LoginService, LOGIN_PATH};
use voyage_admin::config::AppConfig;
use voyage_admin::http::{HttpClient, HttpError};
use voyage_admin::session::SessionStore;

#[derive(Clone, Default)]
struct Seen {
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn spawn_backend(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config_for(addr: SocketAddr, timeout_secs: u64) -> AppConfig {
    AppConfig {
        api_base_url: format!("http://{}", addr),
        login_timeout_secs: timeout_secs,
        ..AppConfig::default()
    }
}

fn service_for(config: &AppConfig) -> LoginService<HttpAuthTransport> {
    let client = HttpClient::new(config);
    LoginService::new(HttpAuthTransport::new(client), config.login_timeout())
}

async fn login_handler(State(seen): State<Seen>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    seen.bodies.lock().unwrap().push(body.clone());
    if body["password"] == "opensesame" {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "token": "tok-123",
                "user": { "id": 7, "role": "admin", "name": "Ada" }
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid email or password" })),
        )
    }
}

fn login_backend(seen: Seen) -> Router {
    Router::new()
        .route(LOGIN_PATH, post(login_handler))
        .with_state(seen)
}

#[tokio::test]
async fn test_login_success_persists_session() {
    let seen = Seen::default();
    let addr = spawn_backend(login_backend(seen.clone())).await;
    let config = config_for(addr, 5);
    let service = service_for(&config);
    let store = SessionStore::in_memory();

    let session = service
        .submit(&store, "  <b>ada@voyage.example</b> ", "opensesame")
        .await
        .unwrap();

    assert_eq!(session.token, "tok-123");
    assert_eq!(session.user.role.as_deref(), Some("admin"));
    assert_eq!(store.read(), Some(session));

    let bodies = seen.bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0],
        json!({ "email": "ada@voyage.example", "password": "opensesame" })
    );
}

#[tokio::test]
async fn test_login_rejection_uses_server_message() {
    let seen = Seen::default();
    let addr = spawn_backend(login_backend(seen)).await;
    let config = config_for(addr, 5);
    let service = service_for(&config);
    let store = SessionStore::in_memory();

    let err = service
        .submit(&store, "ada@voyage.example", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err, AuthError::Rejected("Invalid email or password".to_string()));
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn test_login_non_json_reply_is_connectivity() {
    let app = Router::new().route(
        LOGIN_PATH,
        post(|| async { (StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>") }),
    );
    let addr = spawn_backend(app).await;
    let config = config_for(addr, 5);
    let service = service_for(&config);
    let store = SessionStore::in_memory();

    let err = service.submit(&store, "ada", "pw").await.unwrap_err();

    assert_eq!(err, AuthError::Connectivity);
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn test_login_slow_backend_times_out() {
    let app = Router::new().route(
        LOGIN_PATH,
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "success": true, "token": "late", "user": { "id": 1 } }))
        }),
    );
    let addr = spawn_backend(app).await;
    let config = config_for(addr, 1);
    let service = service_for(&config);
    let store = SessionStore::in_memory();

    let err = service.submit(&store, "ada", "pw").await.unwrap_err();

    assert_eq!(err, AuthError::Connectivity);
    assert!(!service.is_submitting());
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn test_unreachable_backend_is_connectivity() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = config_for(addr, 2);
    let service = service_for(&config);
    let store = SessionStore::in_memory();

    let err = service.submit(&store, "ada", "pw").await.unwrap_err();
    assert_eq!(err, AuthError::Connectivity);
}

async fn charts_handler(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some("Bearer tok-123") => (
            StatusCode::OK,
            Json(json!({ "charts": [{ "title": "Bookings" }] })),
        ),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "message": "expired" }))),
    }
}

#[tokio::test]
async fn test_get_json_sends_bearer_token() {
    let app = Router::new().route("/api/analytics/charts", get(charts_handler));
    let addr = spawn_backend(app).await;
    let client = HttpClient::new(&config_for(addr, 5));

    let payload: Value = client
        .get_json("/api/analytics/charts", Some("tok-123"))
        .await
        .unwrap();
    assert_eq!(payload["charts"][0]["title"], "Bookings");

    let denied = client
        .get_json::<Value>("/api/analytics/charts", Some("stale"))
        .await;
    assert_eq!(denied, Err(HttpError::Unauthorized));

    let anonymous = client.get_json::<Value>("/api/analytics/charts", None).await;
    assert_eq!(anonymous, Err(HttpError::Unauthorized));
}
