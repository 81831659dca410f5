//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error, as seen by HTTP callers.
///
/// Every token verification failure collapses into `InvalidToken`; the
/// precise reason is only available through [`TokenRejection`] in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("no credential presented")]
    MissingCredential,

    #[error("credential is invalid or expired")]
    InvalidToken,

    #[error("role is not allowed to access this resource")]
    InsufficientRole,

    #[error("failed to issue token")]
    TokenIssueFailed,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientRole => StatusCode::FORBIDDEN,
            AuthError::TokenIssueFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AuthError::MissingCredential => (
                "MISSING_CREDENTIAL",
                "Authentication required. Please log in.",
            ),
            AuthError::InvalidToken => ("INVALID_TOKEN", "Invalid or expired token"),
            AuthError::InsufficientRole => (
                "INSUFFICIENT_ROLE",
                "You are not allowed to access this resource",
            ),
            AuthError::TokenIssueFailed => ("TOKEN_ISSUE_FAILED", "Failed to issue token"),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (self.status_code(), body).into_response()
    }
}

/// Why a token failed verification. Internal diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenRejection {
    #[error("token segment is not valid base64url or the token is not three segments")]
    MalformedSegment,

    #[error("token signature does not match")]
    SignatureMismatch,

    #[error("token payload is not a valid claims object")]
    MalformedPayload,

    #[error("token has expired")]
    Expired,
}

impl TokenRejection {
    /// Short label used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            TokenRejection::MalformedSegment => "malformed_segment",
            TokenRejection::SignatureMismatch => "signature_mismatch",
            TokenRejection::MalformedPayload => "malformed_payload",
            TokenRejection::Expired => "expired",
        }
    }
}

/// Configuration errors raised while bootstrapping the signer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET is required and must not be empty")]
    MissingSigningKey,

    #[error("{var} must be 'true' or 'false', got '{value}'")]
    InvalidFlag { var: &'static str, value: String },
}
