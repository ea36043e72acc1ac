use axum::{
    extract::{Query, State},
    Extension,
};

use crate::api::{ApiResponse, ApiResult, ResourceId, ValidJson};
use crate::app::AppState;
use crate::auth::AuthUser;
use crate::database::models::{Menu, MenuInput};
use crate::database::repository::menu::{self, MENUS};
use crate::middleware::require_staff;
use crate::services::{InventoryMenu, InventoryService};

use super::ListQuery;

/// GET /api/menus
pub async fn menus_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Menu>> {
    let mut conn = state.db.acquire().await?;
    let menus = MENUS.select_all(&mut conn, query.include_deleted_for(&user)).await?;
    Ok(ApiResponse::success(menus))
}

/// POST /api/menus
pub async fn menu_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidJson(input): ValidJson<MenuInput>,
) -> ApiResult<Menu> {
    require_staff(&user)?;
    let mut conn = state.db.acquire().await?;
    let created = menu::insert(&mut conn, &input).await?;
    tracing::info!("Menu {} created by {}", created.id, user.user_id);
    Ok(ApiResponse::created(created))
}

/// GET /api/menus/:id
pub async fn menu_get(State(state): State<AppState>, ResourceId(id): ResourceId) -> ApiResult<Menu> {
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::success(MENUS.select_404(&mut conn, id).await?))
}

/// PUT /api/menus/:id
pub async fn menu_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
    ValidJson(input): ValidJson<MenuInput>,
) -> ApiResult<Menu> {
    require_staff(&user)?;
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::success(menu::update(&mut conn, id, &input).await?))
}

/// DELETE /api/menus/:id (soft)
pub async fn menu_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
) -> ApiResult<Menu> {
    require_staff(&user)?;
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::success(MENUS.soft_delete(&mut conn, id).await?))
}

/// POST /api/menus/:id/restore
pub async fn menu_restore(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
) -> ApiResult<Menu> {
    require_staff(&user)?;
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::success(MENUS.restore(&mut conn, id).await?))
}

/// GET /api/menus/:id/portions - whole portions current stock can produce
pub async fn menu_portions_get(State(state): State<AppState>, ResourceId(id): ResourceId) -> ApiResult<InventoryMenu> {
    let mut uow = state.db.begin().await?;
    let computed = InventoryService::portions_for_menu(&mut uow, id).await?;
    uow.commit().await?;
    Ok(ApiResponse::success(computed))
}
