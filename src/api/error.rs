use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::db::postgres::models::api_update_control::ParseApiTypeError;
use crate::db::postgres::models::market_data::ParseAssetTypeError;

/// Handler error mapped onto an HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidApiType(#[from] ParseApiTypeError),

    #[error(transparent)]
    InvalidAssetType(#[from] ParseAssetTypeError),

    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidApiType(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::InvalidAssetType(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::InvalidBody(e) => (StatusCode::BAD_REQUEST, e.body_text()),
            ApiError::Database(e) => {
                error!("Request failed on database access: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = axum::Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
