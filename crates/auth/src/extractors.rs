//! Axum extractors for authentication
//!
//! Generic over any state `S` where `TokenSigner: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.
//!
//! On guarded routes the pipeline has already verified the token and left
//! the claims in the request extensions; the extractors reuse them instead
//! of verifying twice.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::claims::{Claims, Role};
use crate::credentials::extract_credential;
use crate::error::AuthError;
use crate::signer::TokenSigner;

/// Authenticated caller extractor (cookie or bearer token)
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    TokenSigner: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(AuthUser(claims.clone()));
        }

        let credential = extract_credential(&parts.headers).ok_or(AuthError::MissingCredential)?;

        let signer = TokenSigner::from_ref(state);
        let claims = signer
            .verify(&credential.token)
            .ok_or(AuthError::InvalidToken)?;

        Ok(AuthUser(claims))
    }
}

/// Admin-only extractor.
///
/// Like `AuthUser` but rejects any role other than `ADMIN` with 403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

impl<S> FromRequestParts<S> for AdminUser
where
    TokenSigner: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;

        if claims.role != Role::Admin {
            return Err(AuthError::InsufficientRole);
        }

        Ok(AdminUser(claims))
    }
}
