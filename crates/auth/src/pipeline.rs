//! Authorization pipeline middleware
//!
//! Runs in front of every route. Requests outside the guarded prefixes pass
//! through untouched apart from the `x-pathname` marker. Guarded requests
//! must carry a valid token whose role matches the prefix's requirement;
//! on success the verified [`Claims`] are inserted into the request
//! extensions for handlers to read.
//!
//! ```ignore
//! let pipeline = AuthPipeline::new(signer, AccessPolicy::storefront());
//! let app = Router::new()
//!     .route("/api/admin/orders", get(list_orders))
//!     .layer(axum::middleware::from_fn_with_state(pipeline, authorize));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};

use crate::claims::Claims;
use crate::credentials::extract_credential;
use crate::error::AuthError;
use crate::policy::{AccessPolicy, Surface};
use crate::signer::TokenSigner;

/// Request header carrying the original request path for page rendering
pub const PATH_MARKER_HEADER: HeaderName = HeaderName::from_static("x-pathname");

/// Outcome of running a request through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No guarded prefix matched
    Unprotected,
    /// Guarded, credential valid and role sufficient
    Allow(Claims),
    /// Guarded, credential missing, malformed, tampered or expired
    Unauthenticated { surface: Surface, error: AuthError },
    /// Guarded, caller known but not entitled
    Forbidden { surface: Surface },
}

#[derive(Debug, Clone)]
pub struct AuthPipeline {
    signer: TokenSigner,
    policy: Arc<AccessPolicy>,
}

impl AuthPipeline {
    pub fn new(signer: TokenSigner, policy: AccessPolicy) -> Self {
        Self {
            signer,
            policy: Arc::new(policy),
        }
    }

    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn decide(&self, path: &str, headers: &HeaderMap) -> Decision {
        self.decide_at(path, headers, Utc::now())
    }

    pub fn decide_at(&self, path: &str, headers: &HeaderMap, now: DateTime<Utc>) -> Decision {
        let Some(guard) = self.policy.guard_for(path) else {
            return Decision::Unprotected;
        };

        let Some(credential) = extract_credential(headers) else {
            return Decision::Unauthenticated {
                surface: guard.surface,
                error: AuthError::MissingCredential,
            };
        };

        let Some(claims) = self.signer.verify_at(&credential.token, now) else {
            tracing::debug!(path = %path, source = ?credential.source, "Rejected invalid credential");
            return Decision::Unauthenticated {
                surface: guard.surface,
                error: AuthError::InvalidToken,
            };
        };

        if claims.role != guard.required_role {
            tracing::warn!(
                subject_id = %claims.subject_id,
                role = %claims.role,
                required = %guard.required_role,
                path = %path,
                "Access denied for role"
            );
            return Decision::Forbidden {
                surface: guard.surface,
            };
        }

        Decision::Allow(claims)
    }
}

/// Axum middleware entry point; use with `middleware::from_fn_with_state`.
pub async fn authorize(
    State(pipeline): State<AuthPipeline>,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    if let Ok(marker) = HeaderValue::from_str(&path) {
        req.headers_mut().insert(PATH_MARKER_HEADER, marker);
    }

    match pipeline.decide(&path, req.headers()) {
        Decision::Unprotected => next.run(req).await,
        Decision::Allow(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Decision::Unauthenticated {
            surface: Surface::Api,
            error,
        } => error.into_response(),
        Decision::Unauthenticated {
            surface: Surface::Page,
            ..
        } => Redirect::temporary(pipeline.policy().login_path).into_response(),
        Decision::Forbidden {
            surface: Surface::Api,
        } => AuthError::InsufficientRole.into_response(),
        Decision::Forbidden {
            surface: Surface::Page,
        } => Redirect::temporary(pipeline.policy().neutral_path).into_response(),
    }
}
