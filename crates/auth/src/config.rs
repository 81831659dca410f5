//! Authentication configuration

use std::env;
use std::fmt;

use crate::error::ConfigError;

/// Authentication configuration, read once at process start
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Add the `Secure` attribute to the session cookie
    pub secure_cookies: bool,
}

impl AuthConfig {
    /// Load from `JWT_SECRET` and `COOKIE_SECURE`.
    ///
    /// When `COOKIE_SECURE` is unset, cookies are secure iff `APP_URL`
    /// is an `https://` URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.trim().is_empty())
            .ok_or(ConfigError::MissingSigningKey)?;

        let secure_cookies = match env::var("COOKIE_SECURE") {
            Ok(raw) => parse_flag("COOKIE_SECURE", &raw)?,
            Err(_) => env::var("APP_URL")
                .map(|url| url.starts_with("https://"))
                .unwrap_or(false),
        };

        Ok(Self {
            jwt_secret,
            secure_cookies,
        })
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: raw.to_string(),
        }),
    }
}
