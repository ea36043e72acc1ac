use axum::{
    extract::{Query, State},
    Extension,
};

use crate::api::{ApiResponse, ApiResult, ResourceId, ValidJson};
use crate::app::AppState;
use crate::auth::AuthUser;
use crate::database::models::{Table, TableInput};
use crate::database::repository::table::{self, TABLES};
use crate::middleware::require_staff;

use super::ListQuery;

pub async fn tables_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Table>> {
    let mut conn = state.db.acquire().await?;
    let rows = TABLES.select_all(&mut conn, query.include_deleted_for(&user)).await?;
    Ok(ApiResponse::success(rows))
}

pub async fn table_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidJson(fields): ValidJson<TableInput>,
) -> ApiResult<Table> {
    require_staff(&user)?;
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::created(table::insert(&mut conn, &fields).await?))
}

pub async fn table_get(State(state): State<AppState>, ResourceId(id): ResourceId) -> ApiResult<Table> {
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::success(TABLES.select_404(&mut conn, id).await?))
}

pub async fn table_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
    ValidJson(fields): ValidJson<TableInput>,
) -> ApiResult<Table> {
    require_staff(&user)?;
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::success(table::update(&mut conn, id, &fields).await?))
}

pub async fn table_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
) -> ApiResult<Table> {
    require_staff(&user)?;
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::success(TABLES.soft_delete(&mut conn, id).await?))
}

pub async fn table_restore(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
) -> ApiResult<Table> {
    require_staff(&user)?;
    let mut conn = state.db.acquire().await?;
    Ok(ApiResponse::success(TABLES.restore(&mut conn, id).await?))
}
