use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;
use server::ServerOptions;

const API_KEY: &str = "secret";

fn options(api_key: &str) -> ServerOptions {
    ServerOptions {
        api_key: api_key.to_string(),
        allowed_origins: vec!["*".to_string()],
    }
}

async fn app_with_db() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    server::router(Engine::builder().database(db).build(), options(API_KEY))
}

fn app_with_fixtures() -> Router {
    server::router(Engine::builder().fixtures().build(), options(API_KEY))
}

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

async fn send_raw(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    Reply {
        status,
        headers,
        body,
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Reply {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {API_KEY}"));
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_raw(app, request).await
}

fn get_with_auth(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn valid_token_reaches_handler() {
    let app = app_with_db().await;
    let reply = send_raw(&app, get_with_auth("/users", Some("Bearer secret"))).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "success");
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let app = app_with_db().await;

    for authorization in [
        None,
        Some("Basic secret"),
        Some("bearer secret"),
        Some("Bearer wrong"),
        Some("Bearer "),
        Some("Bearer secret extra"),
        Some("secret"),
    ] {
        let reply = send_raw(&app, get_with_auth("/users", authorization)).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED, "{authorization:?}");
        assert_eq!(reply.body["status"], "error");
    }
}

#[tokio::test]
async fn missing_header_message() {
    let app = app_with_db().await;
    let reply = send_raw(&app, get_with_auth("/months/2025_6", None)).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["error"], "Missing Authorization header");
}

#[tokio::test]
async fn unconfigured_secret_is_a_server_error() {
    let app = server::router(Engine::builder().fixtures().build(), options(""));
    let reply = send_raw(&app, get_with_auth("/users", Some("Bearer anything"))).await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply.body["error"], "API key not configured");
}

#[tokio::test]
async fn health_needs_no_token() {
    let app = app_with_db().await;
    let reply = send_raw(&app, get_with_auth("/health", None)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({"status": "healthy", "database": "connected"}));
}

#[tokio::test]
async fn preflight_needs_no_token() {
    let app = app_with_db().await;

    for uri in ["/users", "/users/1", "/pending-users", "/pending-users/1", "/months/2025_6"] {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri(uri)
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .body(Body::empty())
            .unwrap();
        let reply = send_raw(&app, request).await;
        assert_eq!(reply.status, StatusCode::NO_CONTENT, "{uri}");
        assert_eq!(reply.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}

#[tokio::test]
async fn every_response_carries_cors_headers() {
    let app = app_with_db().await;

    let ok = send(&app, Method::GET, "/users", None).await;
    let unauthorized = send_raw(&app, get_with_auth("/users", None)).await;
    let missing = send(&app, Method::GET, "/nowhere", None).await;

    for reply in [ok, unauthorized, missing] {
        assert_eq!(reply.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            reply.headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            reply.headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );
    }
}

#[tokio::test]
async fn unmatched_route_is_enveloped_404() {
    let app = app_with_db().await;
    let reply = send(&app, Method::GET, "/nowhere", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body, json!({"status": "error", "error": "Not found"}));
}

#[tokio::test]
async fn created_user_reads_back() {
    let app = app_with_db().await;

    let created = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"telegramId": "X", "name": "Alice", "role": "boss", "active": true})),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["telegram_id"], "X");

    let fetched = send(&app, Method::GET, "/users/X", None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    let user = &fetched.body["data"];
    assert_eq!(user["telegram_id"], "X");
    assert_eq!(user["name"], "Alice");
    assert_eq!(user["role"], "boss");
    assert_eq!(user["active"], true);

    let all = send(&app, Method::GET, "/users", None).await;
    assert_eq!(all.body["data"]["X"]["name"], "Alice");
}

#[tokio::test]
async fn inactive_user_is_hidden() {
    let app = app_with_db().await;

    send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"telegramId": "X", "name": "Alice", "role": "worker", "active": false})),
    )
    .await;

    let fetched = send(&app, Method::GET, "/users/X", None).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
    assert_eq!(fetched.body["error"], "User not found");

    let all = send(&app, Method::GET, "/users", None).await;
    assert_eq!(all.body["data"], json!({}));
}

#[tokio::test]
async fn update_user() {
    let app = app_with_db().await;

    let missing = send(
        &app,
        Method::PUT,
        "/users/42",
        Some(json!({"name": "Bob", "role": "guest", "active": true})),
    )
    .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"telegramId": "42", "name": "Bob", "role": "guest"})),
    )
    .await;
    let updated = send(
        &app,
        Method::PUT,
        "/users/42",
        Some(json!({"name": "Robert", "role": "admin", "active": true})),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["name"], "Robert");
    assert_eq!(updated.body["data"]["role"], "admin");
}

#[tokio::test]
async fn delete_user_twice() {
    let app = app_with_db().await;

    send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"telegramId": "42", "name": "Bob", "role": "guest"})),
    )
    .await;

    let first = send(&app, Method::DELETE, "/users/42", None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["message"], "User deleted successfully");

    let second = send(&app, Method::DELETE, "/users/42", None).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
    assert!(second.body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn unknown_role_is_a_bad_request() {
    let app = app_with_db().await;
    let reply = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"telegramId": "1", "name": "Eve", "role": "overlord"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blank_name_is_a_bad_request() {
    let app = app_with_db().await;
    let reply = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"telegramId": "1", "name": "  ", "role": "guest"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "name must not be empty");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = app_with_db().await;

    for (method, uri) in [
        (Method::POST, "/users"),
        (Method::PUT, "/users/1"),
        (Method::POST, "/pending-users"),
        (Method::PUT, "/months/2025_6"),
    ] {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {API_KEY}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let reply = send_raw(&app, request).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(reply.body["status"], "error");
        assert_eq!(reply.body["error"], "Invalid request body");
    }
}

#[tokio::test]
async fn pending_user_lifecycle() {
    let app = app_with_db().await;

    let created = send(
        &app,
        Method::POST,
        "/pending-users",
        Some(json!({"telegramId": "77", "name": "Carol", "username": "carol"})),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["username"], "carol");

    let listed = send(&app, Method::GET, "/pending-users", None).await;
    assert_eq!(listed.body["data"]["77"]["name"], "Carol");

    let fetched = send(&app, Method::GET, "/pending-users/77", None).await;
    assert_eq!(fetched.status, StatusCode::OK);

    let deleted = send(&app, Method::DELETE, "/pending-users/77", None).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = send(&app, Method::GET, "/pending-users/77", None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["error"], "Pending user not found");

    let again = send(&app, Method::DELETE, "/pending-users/77", None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pending_username_is_optional() {
    let app = app_with_db().await;
    let created = send(
        &app,
        Method::POST,
        "/pending-users",
        Some(json!({"telegramId": "78", "name": "Dan"})),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["username"], "");
}

#[tokio::test]
async fn month_update_then_read() {
    let app = app_with_db().await;

    let payload = json!({
        "duties": {"1": "Alice"},
        "techDuties": {"1": [{"person": "Bob", "shift": "8"}, {"person": "Eve", "shift": "20"}]},
        "generalSchedule": {"2": [{"person": "Mia", "shift": "DS"}]},
        "colors": {"Alice": "#FF6B6B"}
    });
    let updated = send(&app, Method::PUT, "/months/2025_6", Some(payload.clone())).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["message"], "Month data updated successfully");

    let fetched = send(&app, Method::GET, "/months/2025_6", None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    let month = &fetched.body["data"];
    assert_eq!(month["id"], "2025_6");
    assert_eq!(month["duties"]["1"], "Alice");
    assert_eq!(month["techDuties"], payload["techDuties"]);
    assert_eq!(month["generalSchedule"], payload["generalSchedule"]);
    assert_eq!(month["colors"], payload["colors"]);
}

#[tokio::test]
async fn unknown_month_is_empty() {
    let app = app_with_db().await;
    let reply = send(&app, Method::GET, "/months/9999_1", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    let month = &reply.body["data"];
    assert_eq!(month["id"], "9999_1");
    for field in ["duties", "techDuties", "generalSchedule", "colors"] {
        assert_eq!(month[field], json!({}), "{field}");
    }
}

#[tokio::test]
async fn malformed_month_id_is_a_bad_request() {
    let app = app_with_db().await;
    let reply = send(&app, Method::GET, "/months/june", None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn fixtures_are_served_without_database() {
    let app = app_with_fixtures();

    let health = send_raw(&app, get_with_auth("/health", None)).await;
    assert_eq!(
        health.body,
        json!({"status": "degraded", "database": "not_initialized"})
    );

    let users = send(&app, Method::GET, "/users", None).await;
    assert_eq!(users.body["data"]["670669284"]["role"], "admin");

    let pending = send(&app, Method::GET, "/pending-users/123456789", None).await;
    assert_eq!(pending.status, StatusCode::OK);

    let month = send(&app, Method::GET, "/months/2025_6", None).await;
    assert_eq!(
        month.body["data"]["duties"].as_object().map(|days| days.len()),
        Some(31)
    );

    let update = send(&app, Method::PUT, "/months/2025_6", Some(json!({}))).await;
    assert_eq!(update.status, StatusCode::OK);

    let created = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"telegramId": "5", "name": "Eve", "role": "guest", "active": true})),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["name"], "Eve");
}

#[tokio::test]
async fn wrong_method_is_enveloped_405() {
    let app = app_with_db().await;

    for (method, uri) in [
        (Method::PATCH, "/users"),
        (Method::POST, "/health"),
        (Method::PUT, "/pending-users/1"),
        (Method::DELETE, "/months/2025_6"),
    ] {
        let reply = send(&app, method, uri, None).await;
        assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        assert_eq!(
            reply.body,
            json!({"status": "error", "error": "Method not allowed"})
        );
    }
}

#[tokio::test]
async fn undecodable_path_is_enveloped_400() {
    let app = app_with_db().await;

    for uri in ["/users/%FF", "/pending-users/%FF", "/months/%FF"] {
        let reply = send(&app, Method::GET, uri, None).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(reply.body["status"], "error");
        assert_eq!(reply.body["error"], "Invalid path parameter");
    }
}

#[tokio::test]
async fn month_accepts_partial_assignments_and_nulls() {
    let app = app_with_db().await;

    let updated = send(
        &app,
        Method::PUT,
        "/months/2025_6",
        Some(json!({"duties": null, "techDuties": {"1": [{"person": "A"}]}, "colors": null})),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);

    let fetched = send(&app, Method::GET, "/months/2025_6", None).await;
    let month = &fetched.body["data"];
    assert_eq!(month["techDuties"]["1"], json!([{"person": "A", "shift": ""}]));
    assert_eq!(month["duties"], json!({}));
    assert_eq!(month["colors"], json!({}));
}

#[tokio::test]
async fn name_length_is_bounded() {
    let app = app_with_db().await;

    let short = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"telegramId": "1", "name": "A", "role": "guest"})),
    )
    .await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);
    assert_eq!(short.body["error"], "name must be between 2 and 100 characters");

    let long = send(
        &app,
        Method::POST,
        "/pending-users",
        Some(json!({"telegramId": "2", "name": "x".repeat(101)})),
    )
    .await;
    assert_eq!(long.status, StatusCode::BAD_REQUEST);

    send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"telegramId": "3", "name": "Bob", "role": "guest"})),
    )
    .await;
    let update = send(
        &app,
        Method::PUT,
        "/users/3",
        Some(json!({"name": "B", "role": "guest", "active": true})),
    )
    .await;
    assert_eq!(update.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn username_length_is_bounded() {
    let app = app_with_db().await;

    let reply = send(
        &app,
        Method::POST,
        "/pending-users",
        Some(json!({"telegramId": "4", "name": "Dan", "username": "u".repeat(70)})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "username must be at most 50 characters");

    let ok = send(
        &app,
        Method::POST,
        "/pending-users",
        Some(json!({"telegramId": "4", "name": "Dan", "username": "u".repeat(50)})),
    )
    .await;
    assert_eq!(ok.status, StatusCode::CREATED);
}

#[tokio::test]
async fn echoed_origin_varies_on_origin() {
    let options = ServerOptions {
        api_key: API_KEY.to_string(),
        allowed_origins: vec!["http://localhost:3000".to_string()],
    };
    let app = server::router(Engine::builder().fixtures().build(), options);

    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let reply = send_raw(&app, request).await;
    assert_eq!(
        reply.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(reply.headers[header::VARY], "origin");

    let wildcard = send_raw(&app_with_fixtures(), get_with_auth("/health", None)).await;
    assert!(wildcard.headers.get(header::VARY).is_none());
}
