use axum::{
    Json,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::error::ApiResult;
use crate::app_state::models::AppState;
use crate::db::postgres::models::market_data::{AssetType, MarketData, NewMarketData};

/// `GET /marketdata/last/{assetType}`
pub async fn last_by_asset_type(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(asset_type): Path<String>,
) -> ApiResult<Json<Vec<MarketData>>> {
    let asset_type: AssetType = asset_type.parse()?;
    let rows = app_state
        .market_data_service
        .latest_by_asset_type(asset_type)
        .await?;
    Ok(Json(rows))
}

/// `POST /marketdata/add`
///
/// Malformed bodies, unknown asset types included, are answered with 400.
pub async fn add(
    Extension(app_state): Extension<Arc<AppState>>,
    payload: Result<Json<NewMarketData>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MarketData>)> {
    let Json(data) = payload?;
    let saved = app_state.market_data_service.save_or_update(data).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// `GET /marketdata/find/{symbol}/{assetType}`
pub async fn find_by_symbol(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((symbol, asset_type)): Path<(String, String)>,
) -> ApiResult<Json<Vec<MarketData>>> {
    let asset_type: AssetType = asset_type.parse()?;
    let rows = app_state
        .market_data_service
        .find_by_symbol(&symbol, asset_type)
        .await?;
    Ok(Json(rows))
}

/// `DELETE /marketdata/delete/{id}`
pub async fn delete(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    app_state.market_data_service.delete(id).await?;
    Ok(StatusCode::OK)
}
