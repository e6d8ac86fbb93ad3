use axum::{Json, extract::Extension, http::StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::warn;

use crate::app_state::models::AppState;

pub async fn health_api(Extension(app_state): Extension<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "env": app_state.settings.app_env.env.to_string(),
    }))
}

pub async fn health_db(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<StatusCode, StatusCode> {
    match app_state.repository_health_check.check().await {
        Ok(true) => Ok(StatusCode::OK),
        Ok(false) => Err(StatusCode::INTERNAL_SERVER_ERROR),
        Err(e) => {
            warn!("PostgreSQL health check failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
