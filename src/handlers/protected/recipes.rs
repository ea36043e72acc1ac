use axum::{extract::State, Extension};

use crate::api::{ApiResponse, ApiResult, ResourceId, ValidJson};
use crate::app::AppState;
use crate::auth::AuthUser;
use crate::database::models::{Recipe, RecipeInput};
use crate::database::repository::recipe;
use crate::error::ApiError;
use crate::middleware::require_staff;
use crate::services::catalog_service;

/// GET /api/menus/:id/recipe
pub async fn recipe_get(State(state): State<AppState>, ResourceId(menu_id): ResourceId) -> ApiResult<Recipe> {
    let mut conn = state.db.acquire().await?;
    let found = recipe::find_by_menu(&mut conn, menu_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("recipe for menu {} not found", menu_id)))?;
    Ok(ApiResponse::success(found))
}

/// PUT /api/menus/:id/recipe - create or replace, items in the given order
pub async fn recipe_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(menu_id): ResourceId,
    ValidJson(fields): ValidJson<RecipeInput>,
) -> ApiResult<Recipe> {
    require_staff(&user)?;
    let mut uow = state.db.begin().await?;
    let saved = catalog_service::replace_recipe(uow.conn(), menu_id, &fields).await?;
    uow.commit().await?;
    Ok(ApiResponse::success(saved))
}

/// DELETE /api/menus/:id/recipe
pub async fn recipe_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(menu_id): ResourceId,
) -> Result<ApiResponse<()>, ApiError> {
    require_staff(&user)?;
    let mut conn = state.db.acquire().await?;
    recipe::delete_by_menu(&mut conn, menu_id).await?;
    Ok(ApiResponse::no_content())
}
