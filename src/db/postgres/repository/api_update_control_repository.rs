// src/db/postgres/repository/api_update_control_repository.rs
use crate::db::postgres::connection::PostgresConnection;
use crate::db::postgres::models::api_update_control::{ApiType, ApiUpdateControl};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Error as SqlxError;
use std::sync::Arc;
use tracing::{debug, error};

#[async_trait]
pub trait TraitApiUpdateControlRepository {
    /// Gets the control record for a feed, if one was ever recorded
    async fn find_by_api_type(&self, api_type: ApiType)
    -> Result<Option<ApiUpdateControl>, SqlxError>;

    /// Gets all control records
    async fn find_all(&self) -> Result<Vec<ApiUpdateControl>, SqlxError>;

    /// Inserts the record for `api_type` or overwrites the existing one
    async fn upsert(
        &self,
        api_type: ApiType,
        last_update: DateTime<Utc>,
        update_interval_minutes: i32,
    ) -> Result<ApiUpdateControl, SqlxError>;
}

pub struct StructApiUpdateControlRepository {
    connection: Arc<PostgresConnection>,
}

impl StructApiUpdateControlRepository {
    pub fn new(connection: Arc<PostgresConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl TraitApiUpdateControlRepository for StructApiUpdateControlRepository {
    async fn find_by_api_type(
        &self,
        api_type: ApiType,
    ) -> Result<Option<ApiUpdateControl>, SqlxError> {
        let pool = self.connection.get_pool();

        let result = sqlx::query_as::<_, ApiUpdateControl>(
            "SELECT id, api_type, last_update, update_interval_minutes
             FROM api_update_control
             WHERE api_type = $1",
        )
        .bind(api_type.as_str())
        .fetch_optional(pool)
        .await;

        match &result {
            Ok(Some(_)) => debug!("Found update control for {}", api_type),
            Ok(None) => debug!("No update control recorded for {}", api_type),
            Err(e) => error!("Error fetching update control for {}: {}", api_type, e),
        }

        result
    }

    async fn find_all(&self) -> Result<Vec<ApiUpdateControl>, SqlxError> {
        let pool = self.connection.get_pool();

        let result = sqlx::query_as::<_, ApiUpdateControl>(
            "SELECT id, api_type, last_update, update_interval_minutes
             FROM api_update_control
             ORDER BY id",
        )
        .fetch_all(pool)
        .await;

        match &result {
            Ok(records) => debug!("Fetched {} update control records", records.len()),
            Err(e) => error!("Error fetching update control records: {}", e),
        }

        result
    }

    async fn upsert(
        &self,
        api_type: ApiType,
        last_update: DateTime<Utc>,
        update_interval_minutes: i32,
    ) -> Result<ApiUpdateControl, SqlxError> {
        let pool = self.connection.get_pool();

        // Single statement: the UNIQUE(api_type) constraint keeps one row per feed
        let result = sqlx::query_as::<_, ApiUpdateControl>(
            "INSERT INTO api_update_control (api_type, last_update, update_interval_minutes)
             VALUES ($1, $2, $3)
             ON CONFLICT (api_type)
             DO UPDATE SET last_update = $2, update_interval_minutes = $3
             RETURNING id, api_type, last_update, update_interval_minutes",
        )
        .bind(api_type.as_str())
        .bind(last_update)
        .bind(update_interval_minutes)
        .fetch_one(pool)
        .await;

        match &result {
            Ok(record) => debug!(
                "Upserted update control row {} for {}: last_update={}, interval={}m",
                record.id, api_type, record.last_update, record.update_interval_minutes
            ),
            Err(e) => error!("Error upserting update control for {}: {}", api_type, e),
        }

        result
    }
}
