//! Session API handlers
//!
//! - POST /api/auth/register - Create a CLIENTE account and sign in
//! - POST /api/auth/login - Exchange email and password for a token
//! - POST /api/auth/logout - Clear the session cookie
//! - GET /api/auth/me - Claims of the current caller

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use storefront_auth::{
    cleared_session_cookie, session_cookie, AuthUser, Claims, Role, TOKEN_LIFETIME_SECS,
};
use storefront_common::{
    hash_password, verify_password, verify_password_without_account, Error, Result, ValidatedJson,
};
use validator::Validate;

use crate::accounts::{Account, AccountSummary, NewAccount};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Body returned on successful sign-in or registration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: AccountSummary,
}

/// Issue a token for `account` and attach it as the session cookie
fn start_session(
    state: &AppState,
    jar: CookieJar,
    account: &Account,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let token = state
        .signer()
        .issue(&account.subject())
        .map_err(|e| Error::Internal(e.to_string()))?;

    let jar = jar.add(session_cookie(token.clone(), state.secure_cookies));
    let body = SessionResponse {
        token,
        expires_in: TOKEN_LIFETIME_SECS,
        user: AccountSummary::from(account),
    };

    Ok((jar, Json(body)))
}

/// Run a blocking password operation off the async executor
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Internal(format!("Password task failed: {}", e)))
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let password = request.password;
    let password_hash = blocking(move || hash_password(&password))
        .await?
        .map_err(|e| Error::Internal(e.to_string()))?;

    let account = state
        .accounts
        .insert(NewAccount {
            name: request.name,
            email: request.email,
            password_hash,
            role: Role::Cliente,
        })
        .await?;

    tracing::info!(subject_id = %account.id, "Account registered");

    let (jar, body) = start_session(&state, jar, &account)?;
    Ok((StatusCode::CREATED, jar, body))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse> {
    let password = request.password;

    let Some(account) = state.accounts.find_by_email(&request.email).await? else {
        // Same Argon2 cost as a wrong password so timing does not reveal the account
        blocking(move || verify_password_without_account(&password)).await?;
        tracing::debug!("Login attempt for unknown email");
        return Err(Error::Authentication(INVALID_CREDENTIALS.to_string()));
    };

    let stored_hash = account.password_hash.clone();
    let matches = blocking(move || verify_password(&password, &stored_hash)).await?;

    if !matches {
        tracing::debug!(subject_id = %account.id, "Login attempt with wrong password");
        return Err(Error::Authentication(INVALID_CREDENTIALS.to_string()));
    }

    tracing::info!(subject_id = %account.id, role = %account.role, "Signed in");

    start_session(&state, jar, &account)
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(cleared_session_cookie(state.secure_cookies));
    (StatusCode::NO_CONTENT, jar)
}

/// Claims of whoever holds a valid credential, any role
pub async fn me(AuthUser(claims): AuthUser) -> Json<Claims> {
    Json(claims)
}
