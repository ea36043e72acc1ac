use axum::{
    extract::{Query, State},
    Extension,
};

use crate::api::{ApiResponse, ApiResult, ResourceId, ValidJson};
use crate::app::AppState;
use crate::auth::AuthUser;
use crate::database::models::{Ingredient, IngredientInput};
use crate::database::repository::ingredient::{self, INGREDIENTS};
use crate::middleware::require_staff;

use super::ListQuery;

pub async fn ingredients_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Ingredient>> {
    let mut conn = state.db.acquire().await?;
    let rows = INGREDIENTS.select_all(&mut conn, query.include_deleted_for(&user)).await?;
    Ok(ApiResponse::success(rows))
}

pub async fn ingredient_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidJson(input): ValidJson<IngredientInput>,
) -> ApiResult<Ingredient> {
    require_staff(&user)?;
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::created(ingredient::insert(&mut conn, &input).await?))
}

pub async fn ingredient_get(State(state): State<AppState>, ResourceId(id): ResourceId) -> ApiResult<Ingredient> {
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::success(INGREDIENTS.select_404(&mut conn, id).await?))
}

pub async fn ingredient_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
    ValidJson(input): ValidJson<IngredientInput>,
) -> ApiResult<Ingredient> {
    require_staff(&user)?;
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::success(ingredient::update(&mut conn, id, &input).await?))
}

pub async fn ingredient_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
) -> ApiResult<Ingredient> {
    require_staff(&user)?;
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::success(INGREDIENTS.soft_delete(&mut conn, id).await?))
}

pub async fn ingredient_restore(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
) -> ApiResult<Ingredient> {
    require_staff(&user)?;
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::success(INGREDIENTS.restore(&mut conn, id).await?))
}
