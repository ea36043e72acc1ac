use axum::{extract::State, Extension};

use crate::api::{ApiResponse, ApiResult, ResourceId, ValidJson, ValidQuery};
use crate::app::AppState;
use crate::auth::AuthUser;
use crate::database::models::{
    CreateReservationInput, Reservation, ReservationQuery, StatusChangeInput, UpdateReservationInput,
};
use crate::middleware::require_staff;

/// POST /api/reservations - book a table; rejected with 409 inside the separation window
pub async fn reservation_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidJson(new): ValidJson<CreateReservationInput>,
) -> ApiResult<Reservation> {
    let mut uow = state.db.begin().await?;
    let created = state.reservations.create(&mut uow, user.user_id, new).await?;
    uow.commit().await?;
    Ok(ApiResponse::created(created))
}

/// GET /api/reservations?table_id=&date=&status=
pub async fn reservations_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidQuery(filter): ValidQuery<ReservationQuery>,
) -> ApiResult<Vec<Reservation>> {
    let mut uow = state.db.begin().await?;
    let rows = state.reservations.list(&mut uow, &user, filter).await?;
    uow.commit().await?;
    Ok(ApiResponse::success(rows))
}

pub async fn reservation_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
) -> ApiResult<Reservation> {
    let mut uow = state.db.begin().await?;
    let found = state.reservations.get(&mut uow, &user, id).await?;
    uow.commit().await?;
    Ok(ApiResponse::success(found))
}

/// PUT /api/reservations/:id - owner or staff
pub async fn reservation_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
    ValidJson(changes): ValidJson<UpdateReservationInput>,
) -> ApiResult<Reservation> {
    let mut uow = state.db.begin().await?;
    let updated = state.reservations.update(&mut uow, &user, id, changes).await?;
    uow.commit().await?;
    Ok(ApiResponse::success(updated))
}

/// PATCH /api/reservations/:id/status
pub async fn reservation_status_patch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
    ValidJson(status): ValidJson<StatusChangeInput>,
) -> ApiResult<Reservation> {
    require_staff(&user)?;
    let mut uow = state.db.begin().await?;
    let updated = state.reservations.change_status(&mut uow, id, status).await?;
    uow.commit().await?;
    Ok(ApiResponse::success(updated))
}

pub async fn reservation_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
) -> ApiResult<Reservation> {
    require_staff(&user)?;
    let mut uow = state.db.begin().await?;
    let deleted = state.reservations.delete(&mut uow, id).await?;
    uow.commit().await?;
    Ok(ApiResponse::success(deleted))
}

pub async fn reservation_restore(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
) -> ApiResult<Reservation> {
    require_staff(&user)?;
    let mut uow = state.db.begin().await?;
    let restored = state.reservations.restore(&mut uow, id).await?;
    uow.commit().await?;
    Ok(ApiResponse::success(restored))
}
