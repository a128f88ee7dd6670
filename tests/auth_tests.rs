mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chargehub::auth::jwt::Claims;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use time::OffsetDateTime;
use tower::ServiceExt;
use uuid::Uuid;

use common::{app, login_token, send, SECRET};

#[tokio::test]
async fn register_then_login_returns_token() {
    let app = app();
    let token = login_token(&app, "ada@example.com", "hunter22").await;
    assert!(!token.is_empty());

    let me = send(&app, "GET", "/api/me", Some(&token), None).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], json!("ada@example.com"));
    assert_eq!(me.body["username"], json!("tester"));
}

#[tokio::test]
async fn register_reports_message_only() {
    let app = app();
    let reply = send(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({"username": "bob", "email": "bob@example.com", "password": "pw-secret"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body, json!({"message": "User registered successfully"}));
    assert!(!reply.raw.contains("pw-secret"));
}

#[tokio::test]
async fn wrong_password_is_400_without_token() {
    let app = app();
    login_token(&app, "eve@example.com", "right-one").await;

    let reply = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"email": "eve@example.com", "password": "wrong-one"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body.get("token").is_none());
}

#[tokio::test]
async fn unknown_email_is_400() {
    let app = app();
    let reply = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"email": "ghost@example.com", "password": "x"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let app = app();
    login_token(&app, "dup@example.com", "pw").await;
    let reply = send(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({"username": "again", "email": "dup@example.com", "password": "pw"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn email_case_variants_are_the_same_account() {
    let app = app();
    login_token(&app, "A@x.io", "pw").await;

    let variant = send(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({"username": "again", "email": " a@X.io ", "password": "pw"})),
    )
    .await;
    assert_eq!(variant.status, StatusCode::CONFLICT, "{}", variant.raw);

    let login = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"email": "a@x.io", "password": "pw"})),
    )
    .await;
    assert_eq!(login.status, StatusCode::OK, "{}", login.raw);

    let me = send(&app, "GET", "/api/me", login.body["token"].as_str(), None).await;
    assert_eq!(me.body["email"], json!("a@x.io"));
}

#[tokio::test]
async fn register_requires_every_field() {
    let app = app();
    let missing = send(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({"email": "x@example.com", "password": "pw"})),
    )
    .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let empty = send(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({"username": "", "email": "x@example.com", "password": "pw"})),
    )
    .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert!(empty.body["fields"]["username"].is_array());
}

#[tokio::test]
async fn protected_route_without_header_is_401() {
    let app = app();
    let reply = send(&app, "GET", "/api/charging-stations", None, None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_from_other_secret_is_rejected() {
    let app = app();
    let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
    let claims = Claims {
        sub: Uuid::new_v4(),
        iat: now,
        exp: now + 3600,
        iss: "chargehub".into(),
        aud: "chargehub-clients".into(),
    };
    let forged = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"someone-else"),
    )
    .unwrap();

    let reply = send(&app, "GET", "/api/charging-stations", Some(&forged), None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = app();
    let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
    let claims = Claims {
        sub: Uuid::new_v4(),
        iat: now - 7200,
        exp: now - 3600,
        iss: "chargehub".into(),
        aud: "chargehub-clients".into(),
    };
    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let reply = send(&app, "GET", "/api/charging-stations", Some(&expired), None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_expired_seconds_ago_is_rejected() {
    let app = app();
    let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
    let claims = Claims {
        sub: Uuid::new_v4(),
        iat: now - 90,
        exp: now - 30,
        iss: "chargehub".into(),
        aud: "chargehub-clients".into(),
    };
    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let reply = send(&app, "GET", "/api/charging-stations", Some(&expired), None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn lowercase_bearer_scheme_is_accepted() {
    let app = app();
    let token = login_token(&app, "scheme@example.com", "pw").await;
    let req = Request::builder()
        .uri("/api/me")
        .header(header::AUTHORIZATION, format!("bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn me_requires_a_token() {
    let app = app();
    let reply = send(&app, "GET", "/api/me", None, None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn root_and_test_routes_answer() {
    let app = app();
    let root = send(&app, "GET", "/", None, None).await;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(root.raw, "Server is running!");

    let test = send(&app, "GET", "/api/test", None, None).await;
    assert_eq!(test.body, json!({"message": "API is working!"}));
}
