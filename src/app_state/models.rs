use crate::db::postgres::postgres_service::PostgresService;
use crate::db::postgres::repository::health_check_repository::TraitHealthCheckRepository;
use crate::env_config::models::app_setting::AppSettings;
use crate::services::market_data::service::MarketDataService;
use crate::services::system_status::service::{SystemStatusError, SystemStatusService};
use crate::services::update_control::service::UpdateControlService;
use crate::utils::time_provider::TimeProvider;

use std::sync::Arc;

pub struct AppState {
    pub settings: Arc<AppSettings>,
    pub repository_health_check: Arc<dyn TraitHealthCheckRepository + Send + Sync>,
    pub update_control_service: Arc<UpdateControlService>,
    pub market_data_service: Arc<MarketDataService>,
    pub system_status_service: Arc<SystemStatusService>,
}

impl AppState {
    /// Wires the services on top of the PostgreSQL repositories.
    pub fn new(
        settings: Arc<AppSettings>,
        postgres_service: &PostgresService,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Result<Self, SystemStatusError> {
        let system_status_service = SystemStatusService::new(
            &settings.app_config.system_status,
            settings.app_env.is_production(),
            time_provider.clone(),
        )?;

        Ok(Self {
            repository_health_check: postgres_service.repository_health_check.clone(),
            update_control_service: Arc::new(UpdateControlService::new(
                postgres_service.repository_api_update_control.clone(),
                time_provider,
            )),
            market_data_service: Arc::new(MarketDataService::new(
                postgres_service.repository_market_data.clone(),
            )),
            system_status_service: Arc::new(system_status_service),
            settings,
        })
    }
}
