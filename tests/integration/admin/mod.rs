//! Guarded prefix integration tests
//!
//! - GET /api/admin/session - admin API, JSON 401/403
//! - GET /admin - admin page, redirects

use axum::http::{
    header::{AUTHORIZATION, COOKIE, LOCATION},
    Method, Request, StatusCode,
};
use axum::body::Body;
use chrono::{Duration, Utc};
use storefront_auth::Role;
use tower::ServiceExt;

use crate::common::{
    assertions::assert_error, body_json, body_text, get, get_with_bearer, get_with_cookie,
    AccountFixture, TestApp,
};

mod test_admin_api {
    use super::*;

    #[tokio::test]
    async fn test_admin_with_cookie_is_allowed() {
        let app = TestApp::new();
        let admin = AccountFixture::admin(&app).await;

        let response = app
            .test_router()
            .oneshot(get_with_cookie("/api/admin/session", &admin.token))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["subjectId"], admin.account.id.to_string());
        assert_eq!(body["role"], "ADMIN");
    }

    #[tokio::test]
    async fn test_admin_with_bearer_is_allowed() {
        let app = TestApp::new();
        let admin = AccountFixture::admin(&app).await;

        let response = app
            .test_router()
            .oneshot(get_with_bearer("/api/admin/session", &admin.token))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_admin_roles_are_forbidden() {
        let app = TestApp::new();
        let cliente = AccountFixture::cliente(&app).await;
        let mayorista = AccountFixture::mayorista(&app).await;

        for token in [&cliente.token, &mayorista.token] {
            let response = app
                .test_router()
                .oneshot(get_with_cookie("/api/admin/session", token))
                .await
                .unwrap();

            assert_error(response, StatusCode::FORBIDDEN, "INSUFFICIENT_ROLE").await;
        }
    }

    #[tokio::test]
    async fn test_missing_credential_is_unauthorized() {
        let app = TestApp::new();

        let response = app
            .test_router()
            .oneshot(get("/api/admin/session"))
            .await
            .unwrap();

        assert_error(response, StatusCode::UNAUTHORIZED, "MISSING_CREDENTIAL").await;
    }

    #[tokio::test]
    async fn test_invalid_tokens_are_unauthorized() {
        let app = TestApp::new();
        let admin = AccountFixture::admin(&app).await;

        let forged = TestApp::foreign_signer()
            .issue(&admin.account.subject())
            .unwrap();
        let expired = app
            .signer()
            .issue_at(&admin.account.subject(), Utc::now() - Duration::days(8))
            .unwrap();
        let truncated = admin.token[..admin.token.len() - 2].to_string();

        for token in [forged, expired, truncated, "garbage".to_string()] {
            let response = app
                .test_router()
                .oneshot(get_with_cookie("/api/admin/session", &token))
                .await
                .unwrap();

            assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_TOKEN").await;
        }
    }

    #[tokio::test]
    async fn test_cookie_beats_bearer_header() {
        let app = TestApp::new();
        let admin = AccountFixture::admin(&app).await;
        let cliente = AccountFixture::cliente(&app).await;

        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/admin/session")
            .header(COOKIE, format!("token={}", cliente.token))
            .header(AUTHORIZATION, format!("Bearer {}", admin.token))
            .body(Body::empty())
            .unwrap();

        let response = app.test_router().oneshot(request).await.unwrap();

        assert_error(response, StatusCode::FORBIDDEN, "INSUFFICIENT_ROLE").await;
    }

    #[tokio::test]
    async fn test_role_comes_from_token_not_store() {
        // A token keeps its role until it expires, even if the stored
        // account would now say otherwise
        let app = TestApp::new();
        let cliente = AccountFixture::cliente(&app).await;
        let mut subject = cliente.account.subject();
        subject.role = Role::Admin;
        let stale = app.signer().issue(&subject).unwrap();

        let response = app
            .test_router()
            .oneshot(get_with_cookie("/api/admin/session", &stale))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}

mod test_admin_page {
    use super::*;

    #[tokio::test]
    async fn test_admin_page_renders_for_admin() {
        let app = TestApp::new();
        let admin = AccountFixture::admin(&app).await;

        let response = app
            .test_router()
            .oneshot(get_with_cookie("/admin", &admin.token))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("admin@shop.test"));
        assert!(html.contains("data-path=\"/admin\""));
    }

    #[tokio::test]
    async fn test_admin_page_escapes_email() {
        let app = TestApp::new();
        let admin = AccountFixture::create(&app, "a<b>\"x\"@shop.test", Role::Admin).await;

        let response = app
            .test_router()
            .oneshot(get_with_cookie("/admin", &admin.token))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("a&lt;b&gt;&quot;x&quot;@shop.test"));
        assert!(!html.contains("<b>"));
    }

    #[tokio::test]
    async fn test_unauthenticated_redirects_to_login() {
        let app = TestApp::new();

        for request in [get("/admin"), get_with_cookie("/admin", "not.a.token")] {
            let response = app.test_router().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
            assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
        }
    }

    #[tokio::test]
    async fn test_wrong_role_redirects_to_home() {
        let app = TestApp::new();
        let cliente = AccountFixture::cliente(&app).await;

        let response = app
            .test_router()
            .oneshot(get_with_cookie("/admin", &cliente.token))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/");
    }
}
