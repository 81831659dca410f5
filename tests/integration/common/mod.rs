//! Common test utilities and fixtures for integration tests
//!
//! Provides an in-memory application, account fixtures with issued tokens,
//! request builders, and response helpers.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE},
        Method, Request, Response,
    },
    Router,
};
use serde_json::Value;
use storefront_app::{create_app, Account, AccountStore, AppState, InMemoryAccountStore, NewAccount};
use storefront_auth::{AuthConfig, Role, TokenSigner};
use storefront_common::hash_password;

pub const TEST_SECRET: &str = "integration-test-secret-key";
pub const TEST_PASSWORD: &str = "correct-horse";

/// Test application backed by an in-memory account store
pub struct TestApp {
    pub state: AppState,
    pub accounts: Arc<InMemoryAccountStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_secure_cookies(false)
    }

    pub fn with_secure_cookies(secure_cookies: bool) -> Self {
        let accounts = Arc::new(InMemoryAccountStore::new());
        let config = AuthConfig {
            jwt_secret: TEST_SECRET.to_string(),
            secure_cookies,
        };
        let state = AppState::new(&config, accounts.clone()).unwrap();

        Self { state, accounts }
    }

    /// Fresh router over the shared state
    pub fn test_router(&self) -> Router {
        create_app(self.state.clone())
    }

    pub fn signer(&self) -> &TokenSigner {
        self.state.signer()
    }

    /// A signer with a different key, for forged tokens
    pub fn foreign_signer() -> TokenSigner {
        TokenSigner::from_secret("some-other-deployment-secret").unwrap()
    }
}

/// A stored account plus a valid token for it
pub struct AccountFixture {
    pub account: Account,
    pub token: String,
}

impl AccountFixture {
    pub async fn create(app: &TestApp, email: &str, role: Role) -> Self {
        let account = app
            .accounts
            .insert(NewAccount {
                name: Some("Fixture".to_string()),
                email: email.to_string(),
                password_hash: hash_password(TEST_PASSWORD).unwrap(),
                role,
            })
            .await
            .unwrap();
        let token = app.signer().issue(&account.subject()).unwrap();

        Self { account, token }
    }

    pub async fn admin(app: &TestApp) -> Self {
        Self::create(app, "admin@shop.test", Role::Admin).await
    }

    pub async fn cliente(app: &TestApp) -> Self {
        Self::create(app, "cliente@shop.test", Role::Cliente).await
    }

    pub async fn mayorista(app: &TestApp) -> Self {
        Self::create(app, "mayorista@shop.test", Role::Mayorista).await
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_cookie(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(COOKIE, format!("token={}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// The raw `Set-Cookie` header for the session token, if any
pub fn session_set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("token="))
        .map(str::to_string)
}

/// The token value carried by a `Set-Cookie` header
pub fn cookie_token(set_cookie: &str) -> &str {
    set_cookie
        .strip_prefix("token=")
        .and_then(|rest| rest.split(';').next())
        .unwrap_or("")
}

pub mod assertions {
    use super::*;
    use axum::http::StatusCode;

    /// Assert the `{"error":{"code":...}}` envelope with the given code
    pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
        assert_eq!(response.status(), status);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], code, "unexpected body: {body}");
        assert!(body["error"]["message"].is_string());
    }
}
