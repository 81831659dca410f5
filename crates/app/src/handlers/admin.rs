//! Admin surface handlers
//!
//! Everything here sits under a guarded prefix, so the pipeline has already
//! rejected non-admins. `AdminUser` re-checks the role so a handler stays
//! safe if it is ever mounted elsewhere.

use axum::{
    http::HeaderMap,
    response::{Html, Json},
};
use storefront_auth::{AdminUser, Claims, PATH_MARKER_HEADER};

/// GET /api/admin/session
pub async fn session(AdminUser(claims): AdminUser) -> Json<Claims> {
    Json(claims)
}

/// GET /admin
pub async fn dashboard(AdminUser(claims): AdminUser, headers: HeaderMap) -> Html<String> {
    let path = headers
        .get(PATH_MARKER_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("/admin");

    Html(format!(
        "<!doctype html>\n<html><head><title>Storefront admin</title></head>\
         <body data-path=\"{}\"><h1>Storefront admin</h1><p>Signed in as {}</p></body></html>",
        escape_html(path),
        escape_html(&claims.email)
    ))
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
