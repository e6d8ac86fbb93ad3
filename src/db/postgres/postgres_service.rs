use crate::db::postgres::{
    connection::PostgresConnection,
    repository::{
        api_update_control_repository::{
            StructApiUpdateControlRepository, TraitApiUpdateControlRepository,
        },
        health_check_repository::{StructHealthCheckRepository, TraitHealthCheckRepository},
        market_data_repository::{StructMarketDataRepository, TraitMarketDataRepository},
    },
};
use crate::env_config::models::app_setting::AppSettings;
use std::sync::Arc;
use tracing::{error, info};

pub struct PostgresService {
    pub repository_health_check: Arc<dyn TraitHealthCheckRepository + Send + Sync>,
    pub repository_api_update_control: Arc<dyn TraitApiUpdateControlRepository + Send + Sync>,
    pub repository_market_data: Arc<dyn TraitMarketDataRepository + Send + Sync>,
}

impl PostgresService {
    pub async fn new(settings: &Arc<AppSettings>) -> Result<Self, sqlx::Error> {
        info!("Initializing PostgreSQL service components");

        let postgres_connection = match PostgresConnection::new(settings.clone()).await {
            Ok(conn) => {
                info!("PostgreSQL connection established successfully");
                Arc::new(conn)
            }
            Err(e) => {
                error!("Failed to establish PostgreSQL connection: {}", e);
                return Err(e);
            }
        };

        info!("Initializing repositories");

        let health_check_repository =
            Arc::new(StructHealthCheckRepository::new(postgres_connection.clone()))
                as Arc<dyn TraitHealthCheckRepository + Send + Sync>;

        let api_update_control_repository = Arc::new(StructApiUpdateControlRepository::new(
            postgres_connection.clone(),
        ))
            as Arc<dyn TraitApiUpdateControlRepository + Send + Sync>;

        let market_data_repository =
            Arc::new(StructMarketDataRepository::new(postgres_connection.clone()))
                as Arc<dyn TraitMarketDataRepository + Send + Sync>;

        info!("PostgreSQL service initialized successfully");
        Ok(Self {
            repository_health_check: health_check_repository,
            repository_api_update_control: api_update_control_repository,
            repository_market_data: market_data_repository,
        })
    }
}
