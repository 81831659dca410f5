//! Credential extraction from incoming requests
//!
//! A request may carry its token in the `token` cookie or as an
//! `Authorization: Bearer <token>` header. Sources are tried in the order
//! of [`CREDENTIAL_SOURCES`] and the first non-empty one wins, so the cookie
//! takes precedence when both are present.

use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use axum_extra::extract::cookie::CookieJar;

/// Name of the cookie carrying the session token
pub const TOKEN_COOKIE: &str = "token";

/// Where a credential was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// The `token` cookie
    Cookie,
    /// `Authorization: Bearer <token>`
    BearerHeader,
}

/// Extraction order. Part of the public contract.
pub const CREDENTIAL_SOURCES: [CredentialSource; 2] =
    [CredentialSource::Cookie, CredentialSource::BearerHeader];

impl CredentialSource {
    fn read(&self, headers: &HeaderMap) -> Option<String> {
        match self {
            CredentialSource::Cookie => CookieJar::from_headers(headers)
                .get(TOKEN_COOKIE)
                .map(|cookie| cookie.value().trim().to_string()),
            CredentialSource::BearerHeader => headers
                .get(AUTHORIZATION)
                .and_then(extract_bearer_token)
                .map(|token| token.trim().to_string()),
        }
    }
}

/// A raw, unverified credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub source: CredentialSource,
}

/// Find the first non-empty credential on the request
pub fn extract_credential(headers: &HeaderMap) -> Option<Credential> {
    CREDENTIAL_SOURCES.iter().find_map(|source| {
        source
            .read(headers)
            .filter(|token| !token.is_empty())
            .map(|token| Credential {
                token,
                source: *source,
            })
    })
}

/// Extract bearer token from an Authorization header value.
///
/// The scheme name is matched case-insensitively.
pub fn extract_bearer_token(header: &HeaderValue) -> Option<&str> {
    let (scheme, token) = header.to_str().ok()?.split_once(' ')?;
    scheme.eq_ignore_ascii_case("Bearer").then_some(token)
}
