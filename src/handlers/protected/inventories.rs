use axum::{
    extract::{Query, State},
    Extension,
};

use crate::api::{ApiResponse, ApiResult, ResourceId, ValidJson};
use crate::app::AppState;
use crate::auth::AuthUser;
use crate::database::models::{CreateInventoryInput, Inventory, UpdateInventoryInput};
use crate::database::repository::inventory::{self, INVENTORIES};
use crate::middleware::require_staff;
use crate::services::catalog_service;

use super::ListQuery;

pub async fn inventories_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Inventory>> {
    let mut conn = state.db.acquire().await?;
    let rows = INVENTORIES.select_all(&mut conn, query.include_deleted_for(&user)).await?;
    Ok(ApiResponse::success(rows))
}

/// POST /api/inventories - one stock row per live ingredient
pub async fn inventory_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidJson(new): ValidJson<CreateInventoryInput>,
) -> ApiResult<Inventory> {
    require_staff(&user)?;
    let mut uow = state.db.begin().await?;
    let created = catalog_service::create_inventory(uow.conn(), &new).await?;
    uow.commit().await?;
    Ok(ApiResponse::created(created))
}

pub async fn inventory_get(State(state): State<AppState>, ResourceId(id): ResourceId) -> ApiResult<Inventory> {
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::success(INVENTORIES.select_404(&mut conn, id).await?))
}

/// PUT /api/inventories/:id - set the quantity on hand
pub async fn inventory_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
    ValidJson(quantity): ValidJson<UpdateInventoryInput>,
) -> ApiResult<Inventory> {
    require_staff(&user)?;
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::success(inventory::update_quantity(&mut conn, id, quantity).await?))
}

pub async fn inventory_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
) -> ApiResult<Inventory> {
    require_staff(&user)?;
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::success(INVENTORIES.soft_delete(&mut conn, id).await?))
}

pub async fn inventory_restore(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
) -> ApiResult<Inventory> {
    require_staff(&user)?;
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::success(INVENTORIES.restore(&mut conn, id).await?))
}
