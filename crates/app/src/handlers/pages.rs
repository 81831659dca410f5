//! Public pages

use axum::response::Html;

/// GET /login
///
/// Redirect target for unauthenticated admin page requests. Sign-in itself
/// goes through `POST /api/auth/login`.
pub async fn login_page() -> Html<&'static str> {
    Html(
        "<!doctype html>\n<html><head><title>Sign in</title></head><body>\
         <h1>Sign in</h1><p>Sign in to continue.</p></body></html>",
    )
}

/// GET /
pub async fn home() -> Html<&'static str> {
    Html("<!doctype html>\n<html><head><title>Storefront</title></head><body><h1>Storefront</h1></body></html>")
}

/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
