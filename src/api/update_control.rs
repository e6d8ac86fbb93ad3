use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
};
use std::sync::Arc;

use super::error::ApiResult;
use crate::app_state::models::AppState;
use crate::db::postgres::models::api_update_control::ApiType;
use crate::services::update_control::service::{ApiUpdateStatus, UpdateCheck};

/// `GET /api/update-control/check/{type}`
pub async fn check_update_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(api_type): Path<String>,
) -> ApiResult<Json<UpdateCheck>> {
    let api_type: ApiType = api_type.parse()?;
    let check = app_state.update_control_service.check(api_type).await?;
    Ok(Json(check))
}

/// `POST /api/update-control/update/{type}`
pub async fn record_update(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(api_type): Path<String>,
) -> ApiResult<StatusCode> {
    let api_type: ApiType = api_type.parse()?;
    app_state
        .update_control_service
        .record_update(api_type)
        .await?;
    Ok(StatusCode::OK)
}

/// `GET /api/update-control/status`
pub async fn all_statuses(
    Extension(app_state): Extension<Arc<AppState>>,
) -> ApiResult<Json<Vec<ApiUpdateStatus>>> {
    Ok(Json(app_state.update_control_service.all_statuses().await?))
}
