use crate::db::postgres::connection::PostgresConnection;
use crate::db::postgres::models::market_data::{AssetType, MarketData, NewMarketData};
use async_trait::async_trait;
use sqlx::Error as SqlxError;
use std::sync::Arc;
use tracing::{debug, error};

const COLUMNS: &str =
    "id, asset_type, symbol, date, open, high, low, close, volume, market, base_currency";

#[async_trait]
pub trait TraitMarketDataRepository {
    async fn find_by_symbol_and_asset_type(
        &self,
        symbol: &str,
        asset_type: AssetType,
    ) -> Result<Vec<MarketData>, SqlxError>;

    /// Most recent row for one symbol, by date
    async fn find_latest_by_symbol_and_asset_type(
        &self,
        symbol: &str,
        asset_type: AssetType,
    ) -> Result<Option<MarketData>, SqlxError>;

    /// For each symbol of the type, the rows on that symbol's latest date
    async fn find_latest_by_asset_type(
        &self,
        asset_type: AssetType,
    ) -> Result<Vec<MarketData>, SqlxError>;

    async fn insert(&self, data: &NewMarketData) -> Result<MarketData, SqlxError>;

    /// Overwrites the quote columns (date, OHLCV, market) of an existing row
    async fn update_quote(&self, id: i64, data: &NewMarketData) -> Result<MarketData, SqlxError>;

    /// Returns the number of deleted rows
    async fn delete(&self, id: i64) -> Result<u64, SqlxError>;
}

pub struct StructMarketDataRepository {
    connection: Arc<PostgresConnection>,
}

impl StructMarketDataRepository {
    pub fn new(connection: Arc<PostgresConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl TraitMarketDataRepository for StructMarketDataRepository {
    async fn find_by_symbol_and_asset_type(
        &self,
        symbol: &str,
        asset_type: AssetType,
    ) -> Result<Vec<MarketData>, SqlxError> {
        let pool = self.connection.get_pool();

        let result = sqlx::query_as::<_, MarketData>(&format!(
            "SELECT {COLUMNS} FROM market_data
             WHERE symbol = $1 AND asset_type = $2
             ORDER BY date DESC NULLS LAST, id DESC"
        ))
        .bind(symbol)
        .bind(asset_type.as_str())
        .fetch_all(pool)
        .await;

        match &result {
            Ok(rows) => debug!("Fetched {} rows for {} {}", rows.len(), asset_type, symbol),
            Err(e) => error!("Error fetching market data for {} {}: {}", asset_type, symbol, e),
        }

        result
    }

    async fn find_latest_by_symbol_and_asset_type(
        &self,
        symbol: &str,
        asset_type: AssetType,
    ) -> Result<Option<MarketData>, SqlxError> {
        let pool = self.connection.get_pool();

        sqlx::query_as::<_, MarketData>(&format!(
            "SELECT {COLUMNS} FROM market_data
             WHERE symbol = $1 AND asset_type = $2
             ORDER BY date DESC NULLS LAST, id DESC
             LIMIT 1"
        ))
        .bind(symbol)
        .bind(asset_type.as_str())
        .fetch_optional(pool)
        .await
    }

    async fn find_latest_by_asset_type(
        &self,
        asset_type: AssetType,
    ) -> Result<Vec<MarketData>, SqlxError> {
        let pool = self.connection.get_pool();

        let result = sqlx::query_as::<_, MarketData>(&format!(
            "SELECT {COLUMNS} FROM market_data md
             WHERE md.asset_type = $1
               AND md.date = (
                   SELECT MAX(md2.date) FROM market_data md2
                   WHERE md2.asset_type = $1 AND md2.symbol = md.symbol
               )
             ORDER BY md.symbol, md.id"
        ))
        .bind(asset_type.as_str())
        .fetch_all(pool)
        .await;

        match &result {
            Ok(rows) => debug!("Fetched {} latest rows for {}", rows.len(), asset_type),
            Err(e) => error!("Error fetching latest market data for {}: {}", asset_type, e),
        }

        result
    }

    async fn insert(&self, data: &NewMarketData) -> Result<MarketData, SqlxError> {
        let pool = self.connection.get_pool();

        sqlx::query_as::<_, MarketData>(&format!(
            "INSERT INTO market_data
                 (asset_type, symbol, date, open, high, low, close, volume, market, base_currency)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        ))
        .bind(data.asset_type.as_str())
        .bind(&data.symbol)
        .bind(data.date)
        .bind(data.open)
        .bind(data.high)
        .bind(data.low)
        .bind(data.close)
        .bind(data.volume)
        .bind(&data.market)
        .bind(&data.base_currency)
        .fetch_one(pool)
        .await
    }

    async fn update_quote(&self, id: i64, data: &NewMarketData) -> Result<MarketData, SqlxError> {
        let pool = self.connection.get_pool();

        sqlx::query_as::<_, MarketData>(&format!(
            "UPDATE market_data
             SET date = $2, open = $3, high = $4, low = $5, close = $6, volume = $7, market = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(data.date)
        .bind(data.open)
        .bind(data.high)
        .bind(data.low)
        .bind(data.close)
        .bind(data.volume)
        .bind(&data.market)
        .fetch_one(pool)
        .await
    }

    async fn delete(&self, id: i64) -> Result<u64, SqlxError> {
        let pool = self.connection.get_pool();

        let result = sqlx::query("DELETE FROM market_data WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() > 0 {
            debug!("Deleted market data row {}", id);
        } else {
            debug!("No market data row {} to delete", id);
        }

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sqlx::PgPool;

    fn repository(pool: PgPool) -> StructMarketDataRepository {
        StructMarketDataRepository::new(Arc::new(PostgresConnection::from_pool(pool)))
    }

    fn quote(asset_type: AssetType, symbol: &str, day: u32, close: f64) -> NewMarketData {
        NewMarketData {
            asset_type,
            symbol: symbol.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, day),
            open: None,
            high: None,
            low: None,
            close: Some(close),
            volume: None,
            market: None,
            base_currency: Some("USD".to_string()),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_latest_by_asset_type_picks_max_date_per_symbol(pool: PgPool) {
        let repository = repository(pool);
        repository.insert(&quote(AssetType::Stock, "AAPL", 7, 170.0)).await.unwrap();
        repository.insert(&quote(AssetType::Stock, "AAPL", 10, 172.0)).await.unwrap();
        repository.insert(&quote(AssetType::Stock, "MSFT", 6, 400.0)).await.unwrap();
        repository.insert(&quote(AssetType::Crypto, "BTC", 11, 80000.0)).await.unwrap();

        let latest = repository.find_latest_by_asset_type(AssetType::Stock).await.unwrap();
        let summary: Vec<(&str, Option<f64>)> = latest
            .iter()
            .map(|row| (row.symbol.as_str(), row.close))
            .collect();
        assert_eq!(summary, vec![("AAPL", Some(172.0)), ("MSFT", Some(400.0))]);

        let newest = repository
            .find_latest_by_symbol_and_asset_type("AAPL", AssetType::Stock)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(newest.date, NaiveDate::from_ymd_opt(2025, 3, 10));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_update_quote_and_delete(pool: PgPool) {
        let repository = repository(pool);
        let saved = repository.insert(&quote(AssetType::Forex, "EURUSD", 7, 1.08)).await.unwrap();

        let updated = repository
            .update_quote(saved.id, &quote(AssetType::Forex, "EURUSD", 10, 1.09))
            .await
            .unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.close, Some(1.09));
        assert_eq!(updated.date, NaiveDate::from_ymd_opt(2025, 3, 10));
        // base_currency is not a quote column
        assert_eq!(updated.base_currency.as_deref(), Some("USD"));

        assert_eq!(repository.delete(saved.id).await.unwrap(), 1);
        assert_eq!(repository.delete(saved.id).await.unwrap(), 0);
        assert!(
            repository
                .find_by_symbol_and_asset_type("EURUSD", AssetType::Forex)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
