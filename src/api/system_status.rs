use axum::{Json, extract::Extension};
use std::sync::Arc;

use crate::app_state::models::AppState;
use crate::services::system_status::service::SystemStatus;

/// `GET /api/system/status`
pub async fn system_status(Extension(app_state): Extension<Arc<AppState>>) -> Json<SystemStatus> {
    Json(app_state.system_status_service.status())
}
