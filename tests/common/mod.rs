//! Shared helpers for the integration suite: app construction, request
//! plumbing, and envelope assertions.
#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderValue, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use trap_backend::auth::{AuthService, JwtHandler};
use trap_backend::config::{JwtAlgorithm, JwtConfig};
use trap_backend::http::{app, AppState};
use trap_backend::store::{RefreshTokenStore, UserStore};

pub const TEST_SECRET: &str = "test-secret";

/// Fixed signing config so tests can mint and verify tokens themselves.
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        issuer: "trap-mafia-test".to_owned(),
        audience: "trap-mafia-test".to_owned(),
        algorithm: JwtAlgorithm::Hs256,
        secret: TEST_SECRET.to_owned(),
        public_key: None,
        access_ttl: Duration::from_secs(300),
        refresh_ttl: Duration::from_secs(7 * 24 * 3600),
        leeway_secs: 0,
    }
}

pub fn app_with(jwt: JwtConfig) -> Router {
    let handler = JwtHandler::new(&jwt).expect("test jwt config must build");
    let auth = AuthService::new(handler, UserStore::new(), RefreshTokenStore::new());
    app(
        AppState { auth },
        HeaderValue::from_static("http://localhost:5173"),
    )
}

pub fn test_app() -> Router {
    app_with(test_jwt_config())
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("infallible app")
}

pub async fn get(app: &Router, uri: &str, cookies: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookies) = cookies {
        builder = builder.header(COOKIE, cookies);
    }
    send(app, builder.body(Body::empty()).expect("request")).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    body: Value,
    cookies: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookies) = cookies {
        builder = builder.header(COOKIE, cookies);
    }
    send(app, builder.body(Body::from(body.to_string())).expect("request")).await
}

pub async fn post_empty(app: &Router, uri: &str, cookies: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(cookies) = cookies {
        builder = builder.header(COOKIE, cookies);
    }
    send(app, builder.body(Body::empty()).expect("request")).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).expect("utf8 body")
}

/// Value of the named cookie from the response's Set-Cookie headers.
pub fn set_cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    let header = set_cookie_header(response, name)?;
    let value = header[name.len() + 1..].split(';').next()?;
    Some(value.to_owned())
}

/// Full Set-Cookie header line for the named cookie, attributes included.
pub fn set_cookie_header(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .map(str::to_owned)
}

pub fn cookie_pair(access: &str, refresh: &str) -> String {
    format!("access_token={access}; refresh_token={refresh}")
}

/// Asserts the body is the standard envelope: exactly the five keys, a
/// non-empty string code, message either null or a string, meta null.
pub fn assert_envelope(body: &Value, ok: bool) {
    let obj = body.as_object().unwrap_or_else(|| panic!("not an object: {body}"));
    assert_eq!(obj.len(), 5, "expected exactly five envelope keys: {body}");
    for key in ["ok", "code", "message", "data", "meta"] {
        assert!(obj.contains_key(key), "envelope missing `{key}`: {body}");
    }
    assert_eq!(body["ok"], Value::Bool(ok), "unexpected ok flag: {body}");
    let code = body["code"].as_str().unwrap_or_else(|| panic!("code must be a string: {body}"));
    assert!(!code.is_empty(), "code must not be empty");
    assert!(
        body["message"].is_null() || body["message"].is_string(),
        "message must be null or a string: {body}"
    );
    assert!(body["meta"].is_null(), "meta must stay null: {body}");
}

/// Logs in and returns the (access, refresh) cookie values.
pub async fn login(app: &Router, username: &str) -> (String, String) {
    let response = post_json(
        app,
        "/api/v1/auth/guest-login",
        serde_json::json!({ "username": username }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let access = set_cookie_value(&response, "access_token").expect("access cookie set");
    let refresh = set_cookie_value(&response, "refresh_token").expect("refresh cookie set");
    (access, refresh)
}
