//! Storefront application composition root
//!
//! Wires the account store, the token signer and the authorization
//! pipeline into a single router.

pub mod accounts;
pub mod handlers;
pub mod routes;
pub mod state;

use axum::{middleware, Router};
use storefront_auth::authorize;
use storefront_common::{Config, LogFormat};
use tracing_subscriber::EnvFilter;

pub use accounts::{
    bootstrap_admin, normalize_email, Account, AccountStore, AccountStoreError, AccountSummary,
    InMemoryAccountStore, NewAccount,
};
pub use state::AppState;

/// Create the main application router with all routes and middleware.
///
/// The authorization pipeline wraps every route; unguarded paths pass
/// through with only the path marker added.
pub fn create_app(state: AppState) -> Router {
    let pipeline = state.pipeline.clone();

    routes::routes()
        .with_state(state)
        .layer(middleware::from_fn_with_state(pipeline, authorize))
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured default filter.
#[mutants::skip]
pub fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.log_format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}
