//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{admin, auth, pages};
use crate::state::AppState;

/// Session routes, reachable without a credential
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
}

/// Admin page and API, both behind a guarded prefix
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/api/admin/session", get(admin::session))
}

fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/login", get(pages::login_page))
        .route("/health", get(pages::health_check))
}

/// Create all storefront routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(page_routes())
        .merge(auth_routes())
        .merge(admin_routes())
}
