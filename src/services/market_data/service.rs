use crate::db::postgres::models::market_data::{AssetType, MarketData, NewMarketData};
use crate::db::postgres::repository::market_data_repository::TraitMarketDataRepository;
use sqlx::Error as SqlxError;
use std::sync::Arc;
use tracing::{debug, info};

/// Cache of the quotes fetched from the external feeds.
pub struct MarketDataService {
    repository: Arc<dyn TraitMarketDataRepository + Send + Sync>,
}

impl MarketDataService {
    pub fn new(repository: Arc<dyn TraitMarketDataRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Overwrites the latest row of (symbol, asset type) or inserts the first one.
    pub async fn save_or_update(&self, data: NewMarketData) -> Result<MarketData, SqlxError> {
        let existing = self
            .repository
            .find_latest_by_symbol_and_asset_type(&data.symbol, data.asset_type)
            .await?;

        let saved = match existing {
            Some(existing) => {
                debug!(
                    "Updating market data row {} for {} {}",
                    existing.id, data.asset_type, data.symbol
                );
                self.repository.update_quote(existing.id, &data).await?
            }
            None => self.repository.insert(&data).await?,
        };

        info!(
            "Stored {} {} quote for {:?} as row {}",
            saved.asset_type, saved.symbol, saved.date, saved.id
        );
        Ok(saved)
    }

    pub async fn find_by_symbol(
        &self,
        symbol: &str,
        asset_type: AssetType,
    ) -> Result<Vec<MarketData>, SqlxError> {
        self.repository
            .find_by_symbol_and_asset_type(symbol, asset_type)
            .await
    }

    pub async fn latest_by_asset_type(
        &self,
        asset_type: AssetType,
    ) -> Result<Vec<MarketData>, SqlxError> {
        let rows = self.repository.find_latest_by_asset_type(asset_type).await?;
        debug!("Found {} latest {} rows", rows.len(), asset_type);
        Ok(rows)
    }

    /// Deleting an unknown id is a no-op.
    pub async fn delete(&self, id: i64) -> Result<(), SqlxError> {
        let deleted = self.repository.delete(id).await?;
        if deleted > 0 {
            info!("Deleted market data row {}", id);
        }
        Ok(())
    }
}
