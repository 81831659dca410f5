//! Token issuing and verification
//!
//! Wire format: `b64url(header).b64url(payload).b64url(hmac_sha256(h "." p))`.
//! The header is written but never read back: verification always uses
//! HMAC-SHA256 with the configured key, whatever the header claims.

use std::fmt;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::claims::{Claims, TokenHeader, TokenSubject};
use crate::codec::{decode_json, decode_segment, encode_json, encode_segment};
use crate::config::AuthConfig;
use crate::error::{AuthError, ConfigError, TokenRejection};

type HmacSha256 = Hmac<Sha256>;

/// Fixed token lifetime: 7 days, in seconds
pub const TOKEN_LIFETIME_SECS: i64 = 7 * 24 * 60 * 60;

/// Issues and verifies signed tokens.
///
/// Holds the keyed HMAC state only; the raw secret is not retained.
/// Cloning is cheap and clones can be used from any thread.
#[derive(Clone)]
pub struct TokenSigner {
    mac: HmacSha256,
}

impl TokenSigner {
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        Self::from_secret(config.jwt_secret.as_bytes())
    }

    pub fn from_secret(secret: impl AsRef<[u8]>) -> Result<Self, ConfigError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(ConfigError::MissingSigningKey);
        }
        let mac = HmacSha256::new_from_slice(secret).map_err(|_| ConfigError::MissingSigningKey)?;
        Ok(Self { mac })
    }

    /// Issue a token for `subject`, valid for [`TOKEN_LIFETIME_SECS`] from now.
    pub fn issue(&self, subject: &TokenSubject) -> Result<String, AuthError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, subject: &TokenSubject, now: DateTime<Utc>) -> Result<String, AuthError> {
        let iat = now.timestamp();
        let claims = Claims::for_subject(subject, iat, iat + TOKEN_LIFETIME_SECS);
        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        let encoded = encode_json(&TokenHeader::hs256()).and_then(|header| {
            encode_json(claims).map(|payload| format!("{}.{}", header, payload))
        });

        let signing_input = encoded.map_err(|e| {
            tracing::error!(error = %e, "Failed to serialize token claims");
            AuthError::TokenIssueFailed
        })?;

        let signature = self.signature_for(&signing_input);
        Ok(format!("{}.{}", signing_input, signature))
    }

    fn signature_for(&self, signing_input: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(signing_input.as_bytes());
        encode_segment(&mac.finalize().into_bytes())
    }

    /// Verify a token of unknown provenance.
    ///
    /// Returns `None` for every failure; malformed, tampered and expired
    /// tokens are indistinguishable to the caller.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<Claims> {
        match self.inspect(token, now) {
            Ok(claims) => Some(claims),
            Err(rejection) => {
                tracing::debug!(reason = rejection.kind(), "Token rejected");
                None
            }
        }
    }

    /// Verify a token and report why it failed. For diagnostics and tests.
    pub fn inspect(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenRejection> {
        let (header, payload, signature) = split_token(token)?;

        // The header must be well-formed base64url but its content is ignored
        decode_segment(header)?;
        let signature = decode_segment(signature)?;

        let mut mac = self.mac.clone();
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenRejection::SignatureMismatch)?;

        let claims: Claims = decode_json(payload)?;

        if now.timestamp() > claims.exp {
            return Err(TokenRejection::Expired);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &"HS256")
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Split into exactly three non-empty segments
fn split_token(token: &str) -> Result<(&str, &str, &str), TokenRejection> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature), None)
            if !header.is_empty() && !payload.is_empty() && !signature.is_empty() =>
        {
            Ok((header, payload, signature))
        }
        _ => Err(TokenRejection::MalformedSegment),
    }
}
