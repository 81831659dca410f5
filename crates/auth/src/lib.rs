//! Authentication and authorization for the Storefront server
//!
//! Provides signed session tokens (HMAC-SHA256 over base64url segments),
//! cookie/bearer credential extraction, the role-gated authorization
//! middleware, and axum extractors that work with any state implementing
//! `FromRef<S>` for `TokenSigner`.

mod claims;
pub mod codec;
mod config;
mod cookie;
mod credentials;
mod error;
mod extractors;
mod pipeline;
mod policy;
mod signer;

pub use claims::{Claims, Role, TokenHeader, TokenSubject};
pub use config::AuthConfig;
pub use cookie::{cleared_session_cookie, session_cookie};
pub use credentials::{
    extract_bearer_token, extract_credential, Credential, CredentialSource, CREDENTIAL_SOURCES,
    TOKEN_COOKIE,
};
pub use error::{AuthError, ConfigError, TokenRejection};
pub use extractors::{AdminUser, AuthUser};
pub use pipeline::{authorize, AuthPipeline, Decision, PATH_MARKER_HEADER};
pub use policy::{AccessPolicy, GuardedPrefix, Surface};
pub use signer::{TokenSigner, TOKEN_LIFETIME_SECS};
