mod error;
mod health;
mod market_data;
mod system_status;
mod update_control;

use axum::{
    Extension, Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::app_state::models::AppState;

pub use health::{health_api, health_db};

/// All endpoints, with the shared state attached.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api-health", get(health_api))
        .route("/db-health", get(health_db))
        .route(
            "/api/update-control/check/{type}",
            get(update_control::check_update_status),
        )
        .route(
            "/api/update-control/update/{type}",
            post(update_control::record_update),
        )
        .route(
            "/api/update-control/status",
            get(update_control::all_statuses),
        )
        .route(
            "/marketdata/last/{asset_type}",
            get(market_data::last_by_asset_type),
        )
        .route("/marketdata/add", post(market_data::add))
        .route(
            "/marketdata/find/{symbol}/{asset_type}",
            get(market_data::find_by_symbol),
        )
        .route("/marketdata/delete/{id}", delete(market_data::delete))
        .route("/api/system/status", get(system_status::system_status))
        .layer(Extension(app_state))
}
