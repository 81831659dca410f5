//! Account storage
//!
//! The authorization layer only needs three lookups from the account
//! catalogue. [`AccountStore`] is the seam; [`InMemoryAccountStore`] backs
//! the local server and the tests.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use storefront_auth::{Role, TokenSubject};
use storefront_common::{hash_password, Error};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountStoreError {
    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Account store unavailable: {0}")]
    Unavailable(String),
}

impl From<AccountStoreError> for Error {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::EmailTaken => Error::Conflict(error.to_string()),
            AccountStoreError::Unavailable(msg) => Error::Internal(msg),
        }
    }
}

/// A stored account
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// The identity embedded in tokens issued for this account
    pub fn subject(&self) -> TokenSubject {
        TokenSubject::new(self.id.to_string(), self.email.clone(), self.role)
    }
}

/// Account fields a caller supplies on creation
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Public view of an account, never includes the password hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
            created_at: account.created_at,
        }
    }
}

#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up by email; the email is normalized before comparison
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountStoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountStoreError>;

    /// Create an account, failing with `EmailTaken` on a duplicate email
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountStoreError>;
}

/// Trimmed, lower-cased email used as the uniqueness key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// In-memory account store keyed by id
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountStoreError> {
        let email = normalize_email(email);
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountStoreError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, AccountStoreError> {
        let email = normalize_email(&account.email);

        // Write lock held across the check so concurrent inserts cannot race
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == email) {
            return Err(AccountStoreError::EmailTaken);
        }

        let stored = Account {
            id: Uuid::new_v4(),
            name: account.name,
            email,
            password_hash: account.password_hash,
            role: account.role,
            created_at: Utc::now(),
        };
        accounts.insert(stored.id, stored.clone());

        Ok(stored)
    }
}

/// Create the bootstrap administrator unless the email is already registered.
///
/// An existing account with that email is left untouched, whatever its role.
pub async fn bootstrap_admin(
    store: &dyn AccountStore,
    email: &str,
    password: &str,
) -> anyhow::Result<Account> {
    if let Some(existing) = store.find_by_email(email).await? {
        if existing.role != Role::Admin {
            tracing::warn!(
                subject_id = %existing.id,
                role = %existing.role,
                "Bootstrap admin email belongs to a non-admin account"
            );
        }
        return Ok(existing);
    }

    let password_hash = hash_password(password)?;
    let account = store
        .insert(NewAccount {
            name: Some("Administrator".to_string()),
            email: email.to_string(),
            password_hash,
            role: Role::Admin,
        })
        .await?;

    tracing::info!(subject_id = %account.id, "Bootstrap admin account created");
    Ok(account)
}
