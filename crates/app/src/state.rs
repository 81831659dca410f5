//! Application state and nested-state wiring

use std::sync::Arc;

use axum::extract::FromRef;
use storefront_auth::{AccessPolicy, AuthConfig, AuthPipeline, ConfigError, TokenSigner};

use crate::accounts::AccountStore;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pipeline: AuthPipeline,
    pub accounts: Arc<dyn AccountStore>,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(config: &AuthConfig, accounts: Arc<dyn AccountStore>) -> Result<Self, ConfigError> {
        let signer = TokenSigner::new(config)?;
        Ok(Self {
            pipeline: AuthPipeline::new(signer, AccessPolicy::storefront()),
            accounts,
            secure_cookies: config.secure_cookies,
        })
    }

    pub fn signer(&self) -> &TokenSigner {
        self.pipeline.signer()
    }
}

impl FromRef<AppState> for TokenSigner {
    fn from_ref(state: &AppState) -> Self {
        state.pipeline.signer().clone()
    }
}

impl FromRef<AppState> for AuthPipeline {
    fn from_ref(state: &AppState) -> Self {
        state.pipeline.clone()
    }
}
