//! Shared harness for router-level tests

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use hr_server::auth::JwtConfig;
use hr_server::{Config, ServerState, build_router};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "router-tests-secret-0123456789-abcdefghij";

pub fn test_config() -> Config {
    Config::for_tests(JwtConfig::new(TEST_SECRET))
}

pub struct TestApp {
    pub state: ServerState,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_state(ServerState::in_memory(&test_config()))
    }

    pub fn with_state(state: ServerState) -> Self {
        let router = build_router(state.clone());
        Self { state, router }
    }

    /// Token signed by the server's own JwtService
    pub fn token(
        &self,
        user_id: &str,
        employee_id: Option<i64>,
        role: &str,
        permissions: &[&str],
    ) -> String {
        let permissions: Vec<String> = permissions.iter().map(|p| p.to_string()).collect();
        self.state
            .get_jwt_service()
            .generate_token(user_id, employee_id, user_id, role, &permissions)
            .unwrap()
    }

    pub fn admin_token(&self) -> String {
        self.token("admin-1", Some(1), "Admin", &["all"])
    }

    pub fn employee_token(&self, employee_id: i64) -> String {
        self.token(&format!("user-{employee_id}"), Some(employee_id), "Employee", &[])
    }

    pub async fn request(&self, request: Request<Body>) -> http::Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Send a JSON request and decode the JSON reply
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = self.request(builder.body(body).unwrap()).await;
        let status = response.status();
        (status, read_json(response).await)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }
}

pub async fn read_bytes(response: http::Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn read_json(response: http::Response<Body>) -> Value {
    let bytes = read_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

/// Every reply, success or failure, carries the same four keys
pub fn assert_envelope(body: &Value) {
    let object = body.as_object().expect("envelope must be a JSON object");
    assert!(object["success"].is_boolean(), "success: {body}");
    assert!(object["message"].is_string(), "message: {body}");
    assert!(object.contains_key("data"), "data: {body}");
    assert!(object["errors"].is_array(), "errors: {body}");
}

pub fn assert_failure(body: &Value) {
    assert_envelope(body);
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
}
