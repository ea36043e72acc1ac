pub mod auth;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::api::ApiResponse;
use crate::app::AppState;
use crate::error::ApiError;

/// GET / - service info
pub async fn root() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": "Restaurant API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health (public)",
            "auth": "/auth/register, /auth/login (public)",
            "me": "/api/auth/me (protected)",
            "menus": "/api/menus[/:id[/recipe|/portions|/restore]] (protected)",
            "ingredients": "/api/ingredients[/:id] (protected)",
            "inventories": "/api/inventories[/:id] (protected)",
            "tables": "/api/tables[/:id] (protected)",
            "reservations": "/api/reservations[/:id[/status|/restore]] (protected)",
        }
    }))
}

/// GET /health - 200 when the database answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok",
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            let error = ApiError::service_unavailable("database unavailable");
            let mut body = error.to_json();
            body["data"] = json!({ "status": "degraded", "timestamp": now });
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}
