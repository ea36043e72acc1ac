use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::Database;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::services::ReservationService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<AppConfig>,
    pub reservations: ReservationService,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig) -> Self {
        let reservations = ReservationService::new(&config.reservation);
        Self {
            db,
            config: Arc::new(config),
            reservations,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth_routes())
        .merge(menu_routes())
        .merge(catalog_routes())
        .merge(inventory_routes())
        .merge(reservation_routes())
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    let mut app = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/auth/register", post(public::auth::register_post))
        .route("/auth/login", post(public::auth::login_post))
        // Protected API
        .merge(api)
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(state.config.api.request_timeout_secs)))
        .layer(cors_layer(&state.config));

    if state.config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app.with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use protected::auth;

    Router::new().route("/api/auth/me", get(auth::me_get))
}

fn menu_routes() -> Router<AppState> {
    use protected::{menus, recipes};

    Router::new()
        .route("/api/menus", get(menus::menus_get).post(menus::menu_post))
        .route(
            "/api/menus/:id",
            get(menus::menu_get).put(menus::menu_put).delete(menus::menu_delete),
        )
        .route("/api/menus/:id/restore", post(menus::menu_restore))
        .route("/api/menus/:id/portions", get(menus::menu_portions_get))
        .route(
            "/api/menus/:id/recipe",
            get(recipes::recipe_get).put(recipes::recipe_put).delete(recipes::recipe_delete),
        )
}

fn catalog_routes() -> Router<AppState> {
    use protected::{ingredients, tables};

    Router::new()
        .route(
            "/api/ingredients",
            get(ingredients::ingredients_get).post(ingredients::ingredient_post),
        )
        .route(
            "/api/ingredients/:id",
            get(ingredients::ingredient_get)
                .put(ingredients::ingredient_put)
                .delete(ingredients::ingredient_delete),
        )
        .route("/api/ingredients/:id/restore", post(ingredients::ingredient_restore))
        .route("/api/tables", get(tables::tables_get).post(tables::table_post))
        .route(
            "/api/tables/:id",
            get(tables::table_get).put(tables::table_put).delete(tables::table_delete),
        )
        .route("/api/tables/:id/restore", post(tables::table_restore))
}

fn inventory_routes() -> Router<AppState> {
    use protected::inventories;

    Router::new()
        .route(
            "/api/inventories",
            get(inventories::inventories_get).post(inventories::inventory_post),
        )
        .route(
            "/api/inventories/:id",
            get(inventories::inventory_get)
                .put(inventories::inventory_put)
                .delete(inventories::inventory_delete),
        )
        .route("/api/inventories/:id/restore", post(inventories::inventory_restore))
}

fn reservation_routes() -> Router<AppState> {
    use protected::reservations;

    Router::new()
        .route(
            "/api/reservations",
            get(reservations::reservations_get).post(reservations::reservation_post),
        )
        .route(
            "/api/reservations/:id",
            get(reservations::reservation_get)
                .put(reservations::reservation_put)
                .delete(reservations::reservation_delete),
        )
        .route("/api/reservations/:id/status", patch(reservations::reservation_status_patch))
        .route("/api/reservations/:id/restore", post(reservations::reservation_restore))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
