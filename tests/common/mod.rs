#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use chargehub::{
    build_app,
    config::{AppConfig, JwtConfig, PasswordConfig, RouteConfig},
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "integration-secret";

pub fn config(routes: RouteConfig) -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".into(),
        max_connections: 1,
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        jwt: JwtConfig {
            secret: SECRET.into(),
            issuer: "chargehub".into(),
            audience: "chargehub-clients".into(),
            ttl_minutes: 60,
        },
        password: PasswordConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        },
        routes,
    }
}

pub fn app() -> Router {
    app_with(RouteConfig::default())
}

pub fn app_with(routes: RouteConfig) -> Router {
    build_app(AppState::in_memory(config(routes)))
}

pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
    pub raw: String,
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp: Response<Body> = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let raw = String::from_utf8_lossy(&bytes).into_owned();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Reply { status, body, raw }
}

/// Registers a user and returns a fresh token for them.
pub async fn login_token(app: &Router, email: &str, password: &str) -> String {
    let registered = send(
        app,
        "POST",
        "/api/register",
        None,
        Some(serde_json::json!({"username": "tester", "email": email, "password": password})),
    )
    .await;
    assert_eq!(registered.status, StatusCode::CREATED, "{}", registered.raw);

    let login = send(
        app,
        "POST",
        "/api/login",
        None,
        Some(serde_json::json!({"email": email, "password": password})),
    )
    .await;
    assert_eq!(login.status, StatusCode::OK, "{}", login.raw);
    login.body["token"].as_str().unwrap().to_string()
}
