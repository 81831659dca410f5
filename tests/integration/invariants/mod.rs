//! Cross-cutting properties of tokens and the authorization pipeline

use axum::http::{header::LOCATION, StatusCode};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde_json::Value;
use storefront_auth::{Role, TokenSubject};
use tower::ServiceExt;

use crate::common::{body_text, get, get_with_bearer, get_with_cookie, TestApp};

fn decode_segment(segment: &str) -> Value {
    let bytes = URL_SAFE_NO_PAD.decode(segment).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let app = TestApp::new();

    let admin_token = app
        .signer()
        .issue(&TokenSubject::new("u1", "a@b.com", Role::Admin))
        .unwrap();
    let claims = app.signer().verify(&admin_token).unwrap();
    assert_eq!(claims.role, Role::Admin);
    assert_eq!(claims.subject_id, "u1");

    let allowed = app
        .test_router()
        .oneshot(get_with_cookie("/api/admin/session", &admin_token))
        .await
        .unwrap();
    assert_eq!(allowed.status(), StatusCode::OK);

    let cliente_token = app
        .signer()
        .issue(&TokenSubject::new("u1", "a@b.com", Role::Cliente))
        .unwrap();
    let forbidden = app
        .test_router()
        .oneshot(get_with_cookie("/api/admin/session", &cliente_token))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    for request in [
        get("/api/admin/session"),
        get_with_cookie("/api/admin/session", ""),
    ] {
        let response = app.test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_token_wire_format() {
    let app = TestApp::new();
    let token = app
        .signer()
        .issue(&TokenSubject::new("u1", "a@b.com", Role::Mayorista))
        .unwrap();

    let segments: Vec<&str> = token.split('.').collect();
    assert_eq!(segments.len(), 3);
    for segment in &segments {
        assert!(!segment.contains('='));
        assert!(!segment.contains('+'));
        assert!(!segment.contains('/'));
    }

    let header = decode_segment(segments[0]);
    assert_eq!(header["alg"], "HS256");
    assert_eq!(header["typ"], "JWT");

    let payload = decode_segment(segments[1]);
    assert_eq!(payload["subjectId"], "u1");
    assert_eq!(payload["email"], "a@b.com");
    assert_eq!(payload["role"], "MAYORISTA");
    assert_eq!(
        payload["exp"].as_i64().unwrap() - payload["iat"].as_i64().unwrap(),
        604800
    );

    // HMAC-SHA256 output is 32 bytes
    assert_eq!(URL_SAFE_NO_PAD.decode(segments[2]).unwrap().len(), 32);
}

#[tokio::test]
async fn test_unguarded_paths_always_pass() {
    let app = TestApp::new();

    for path in ["/", "/login", "/health"] {
        for request in [
            get(path),
            get_with_cookie(path, "garbage"),
            get_with_bearer(path, "garbage"),
        ] {
            let response = app.test_router().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{path}");
            assert!(response.headers().get(LOCATION).is_none());
        }
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    let response = app.test_router().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
}

#[tokio::test]
async fn test_lookalike_prefix_is_not_guarded() {
    let app = TestApp::new();

    // No such route, but the pipeline must not treat it as admin
    let response = app
        .test_router()
        .oneshot(get("/administrator"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
