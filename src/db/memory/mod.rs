//! In-memory repositories with the same contracts as the Postgres ones.

use crate::db::postgres::models::api_update_control::{ApiType, ApiUpdateControl};
use crate::db::postgres::models::market_data::{AssetType, MarketData, NewMarketData};
use crate::db::postgres::repository::{
    api_update_control_repository::TraitApiUpdateControlRepository,
    health_check_repository::TraitHealthCheckRepository,
    market_data_repository::TraitMarketDataRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Error as SqlxError;
use std::cmp::Reverse;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct MemoryHealthCheckRepository {
    healthy: AtomicBool,
}

impl MemoryHealthCheckRepository {
    pub fn new(healthy: bool) -> Self {
        Self {
            healthy: AtomicBool::new(healthy),
        }
    }
}

#[async_trait]
impl TraitHealthCheckRepository for MemoryHealthCheckRepository {
    async fn check(&self) -> Result<bool, SqlxError> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(true)
        } else {
            Err(SqlxError::PoolTimedOut)
        }
    }
}

#[derive(Default)]
pub struct MemoryApiUpdateControlRepository {
    records: Mutex<Vec<ApiUpdateControl>>,
}

#[async_trait]
impl TraitApiUpdateControlRepository for MemoryApiUpdateControlRepository {
    async fn find_by_api_type(
        &self,
        api_type: ApiType,
    ) -> Result<Option<ApiUpdateControl>, SqlxError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.api_type == api_type).cloned())
    }

    async fn find_all(&self) -> Result<Vec<ApiUpdateControl>, SqlxError> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn upsert(
        &self,
        api_type: ApiType,
        last_update: DateTime<Utc>,
        update_interval_minutes: i32,
    ) -> Result<ApiUpdateControl, SqlxError> {
        let mut records = self.records.lock().unwrap();
        if let Some(existing) = records.iter_mut().find(|r| r.api_type == api_type) {
            existing.last_update = last_update;
            existing.update_interval_minutes = update_interval_minutes;
            return Ok(existing.clone());
        }

        let record = ApiUpdateControl {
            id: records.len() as i64 + 1,
            api_type,
            last_update,
            update_interval_minutes,
        };
        records.push(record.clone());
        Ok(record)
    }
}

#[derive(Default)]
pub struct MemoryMarketDataRepository {
    rows: Mutex<Vec<MarketData>>,
}

impl MemoryMarketDataRepository {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl TraitMarketDataRepository for MemoryMarketDataRepository {
    async fn find_by_symbol_and_asset_type(
        &self,
        symbol: &str,
        asset_type: AssetType,
    ) -> Result<Vec<MarketData>, SqlxError> {
        let rows = self.rows.lock().unwrap();
        let mut found: Vec<MarketData> = rows
            .iter()
            .filter(|r| r.symbol == symbol && r.asset_type == asset_type)
            .cloned()
            .collect();
        // date DESC NULLS LAST, id DESC
        found.sort_by_key(|r| (r.date.is_none(), Reverse(r.date), Reverse(r.id)));
        Ok(found)
    }

    async fn find_latest_by_symbol_and_asset_type(
        &self,
        symbol: &str,
        asset_type: AssetType,
    ) -> Result<Option<MarketData>, SqlxError> {
        Ok(self
            .find_by_symbol_and_asset_type(symbol, asset_type)
            .await?
            .into_iter()
            .next())
    }

    async fn find_latest_by_asset_type(
        &self,
        asset_type: AssetType,
    ) -> Result<Vec<MarketData>, SqlxError> {
        let rows = self.rows.lock().unwrap();
        let of_type: Vec<&MarketData> = rows.iter().filter(|r| r.asset_type == asset_type).collect();

        let mut latest: Vec<MarketData> = of_type
            .iter()
            .filter(|r| {
                let max_date = of_type
                    .iter()
                    .filter(|o| o.symbol == r.symbol)
                    .filter_map(|o| o.date)
                    .max();
                r.date.is_some() && r.date == max_date
            })
            .map(|r| (*r).clone())
            .collect();
        latest.sort_by(|a, b| a.symbol.cmp(&b.symbol).then(a.id.cmp(&b.id)));
        Ok(latest)
    }

    async fn insert(&self, data: &NewMarketData) -> Result<MarketData, SqlxError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let row = MarketData {
            id,
            asset_type: data.asset_type,
            symbol: data.symbol.clone(),
            date: data.date,
            open: data.open,
            high: data.high,
            low: data.low,
            close: data.close,
            volume: data.volume,
            market: data.market.clone(),
            base_currency: data.base_currency.clone(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update_quote(&self, id: i64, data: &NewMarketData) -> Result<MarketData, SqlxError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(SqlxError::RowNotFound)?;
        row.date = data.date;
        row.open = data.open;
        row.high = data.high;
        row.low = data.low;
        row.close = data.close;
        row.volume = data.volume;
        row.market = data.market.clone();
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<u64, SqlxError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok((before - rows.len()) as u64)
    }
}
