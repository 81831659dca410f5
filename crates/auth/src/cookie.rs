//! Session cookie construction

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::credentials::TOKEN_COOKIE;
use crate::signer::TOKEN_LIFETIME_SECS;

/// Cookie carrying a freshly issued token.
///
/// `HttpOnly; SameSite=Strict; Path=/; Max-Age=604800`, plus `Secure`
/// when the deployment is served over HTTPS.
pub fn session_cookie(token: impl Into<String>, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token.into()))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .path("/")
        .max_age(Duration::seconds(TOKEN_LIFETIME_SECS))
        .build()
}

/// Cookie that makes the browser drop the session token
pub fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}
