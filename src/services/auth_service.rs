use serde::Serialize;
use sqlx::PgConnection;
use tracing::{info, warn};

use crate::auth::{
    generate_jwt, hash_password, token_lifetime_secs, verify_password, AuthError, AuthUser, Claims,
};
use crate::config::SecurityConfig;
use crate::database::models::{LoginInput, RegisterInput, User, UserRole};
use crate::database::repository::user;
use crate::domain::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<crate::database::DatabaseError> for AccountError {
    fn from(err: crate::database::DatabaseError) -> Self {
        AccountError::Domain(err.into())
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Register a new account. The very first account becomes staff so a fresh
/// installation can manage its own catalog; everyone after is a customer.
/// Must run inside a transaction: the registration lock is transaction-scoped.
pub async fn register(conn: &mut PgConnection, input: &RegisterInput) -> Result<User, AccountError> {
    user::lock_registrations(&mut *conn).await?;
    if user::find_by_email(&mut *conn, &input.email).await?.is_some() {
        return Err(DomainError::Conflict(format!("email {} is already registered", input.email)).into());
    }

    let role = if user::has_staff(&mut *conn).await? {
        UserRole::Customer
    } else {
        UserRole::Staff
    };
    let password_hash = hash_password(&input.password)?;
    let created = user::insert(conn, &input.name, &input.email, &password_hash, role).await?;
    info!("Registered user {} as {:?}", created.id, created.role);
    Ok(created)
}

pub async fn login(conn: &mut PgConnection, input: &LoginInput, security: &SecurityConfig) -> Result<LoginResponse, AccountError> {
    let Some(found) = user::find_by_email(conn, &input.email).await? else {
        warn!("Login failed: unknown email {}", input.email);
        return Err(AccountError::InvalidCredentials);
    };
    if !verify_password(&input.password, &found.password_hash) {
        warn!("Login failed: wrong password for user {}", found.id);
        return Err(AccountError::InvalidCredentials);
    }

    let claims = Claims::new(&found, security.jwt_expiry_hours);
    let token = generate_jwt(&claims, security)?;
    info!("User {} logged in", found.id);
    Ok(LoginResponse {
        token,
        user: found,
        expires_in: token_lifetime_secs(security.jwt_expiry_hours),
    })
}

pub async fn me(conn: &mut PgConnection, actor: &AuthUser) -> Result<User, DomainError> {
    user::find_by_id(conn, actor.user_id)
        .await?
        .ok_or_else(|| DomainError::not_found("user", actor.user_id))
}

