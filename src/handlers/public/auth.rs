use axum::extract::State;

use crate::api::{ApiResponse, ApiResult, ValidJson};
use crate::app::AppState;
use crate::database::models::{LoginInput, RegisterInput, User};
use crate::services::{auth_service, LoginResponse};

/// POST /auth/register - create an account
pub async fn register_post(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<RegisterInput>,
) -> ApiResult<User> {
    let mut uow = state.db.begin().await?;
    let user = auth_service::register(uow.conn(), &input).await?;
    uow.commit().await?;
    Ok(ApiResponse::created(user))
}

/// POST /auth/login - exchange credentials for a JWT
pub async fn login_post(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LoginInput>,
) -> ApiResult<LoginResponse> {
    let mut conn = state.db.acquire().await?;
    let session = auth_service::login(&mut conn, &input, &state.config.security).await?;
    Ok(ApiResponse::success(session))
}
