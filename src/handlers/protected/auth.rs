use axum::{extract::State, Extension};

use crate::api::{ApiResponse, ApiResult};
use crate::app::AppState;
use crate::auth::AuthUser;
use crate::database::models::User;
use crate::services::auth_service;

/// GET /api/auth/me - the authenticated account
pub async fn me_get(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<User> {
    let mut conn = state.db.acquire().await?;
    let account = auth_service::me(&mut conn, &user).await?;
    Ok(ApiResponse::success(account))
}
