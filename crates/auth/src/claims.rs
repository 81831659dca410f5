//! Token claims types

use serde::{Deserialize, Serialize};

/// Account role carried in the token. The sole authorization fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Back-office administrator
    Admin,
    /// Retail customer
    Cliente,
    /// Wholesale customer
    Mayorista,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Cliente => "CLIENTE",
            Role::Mayorista => "MAYORISTA",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity fields a caller may supply when asking for a token.
///
/// Carries no `iat`/`exp`; fields of those names in deserialized input are
/// dropped, so timestamps always come from the signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSubject {
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    pub email: String,
    pub role: Role,
}

impl TokenSubject {
    pub fn new(subject_id: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            subject_id: subject_id.into(),
            email: email.into(),
            role,
        }
    }
}

/// Decoded token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account identifier
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    /// Display only, never an authorization key
    pub email: String,
    /// Role at issuance time
    pub role: Role,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expires at (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    pub(crate) fn for_subject(subject: &TokenSubject, iat: i64, exp: i64) -> Self {
        Self {
            subject_id: subject.subject_id.clone(),
            email: subject.email.clone(),
            role: subject.role,
            iat,
            exp,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The identity part of the claims, without timestamps
    pub fn subject(&self) -> TokenSubject {
        TokenSubject {
            subject_id: self.subject_id.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Fixed token header. Verification never reads it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl TokenHeader {
    pub fn hs256() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}
