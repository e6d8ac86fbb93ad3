// File: src/services/update_control/monitor.rs
use super::service::UpdateControlService;
use crate::db::postgres::models::api_update_control::ApiType;
use crate::env_config::models::app_config::StalenessMonitorConfig;
use crate::utils::time_provider::TimeProvider;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{debug, error, info, warn};

/// Periodically logs which feeds are due for a refresh.
pub struct StalenessMonitor {
    service: Arc<UpdateControlService>,
    config: StalenessMonitorConfig,
    time_provider: Arc<dyn TimeProvider>,
}

impl StalenessMonitor {
    pub fn new(
        service: Arc<UpdateControlService>,
        config: StalenessMonitorConfig,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            service,
            config,
            time_provider,
        }
    }

    /// Одна итерация планировщика: `None`, если сейчас вне окна работы
    pub async fn run_if_allowed(&self) -> Result<Option<Vec<(ApiType, bool)>>, sqlx::Error> {
        let now = self.time_provider.now().time();
        if !self.config.is_operation_allowed_at(now) {
            debug!("Outside of staleness monitor operation window ({}), skipping", now);
            return Ok(None);
        }

        self.run_once().await.map(Some)
    }

    /// Запускает одну проверку всех источников
    pub async fn run_once(&self) -> Result<Vec<(ApiType, bool)>, sqlx::Error> {
        let mut states = Vec::with_capacity(ApiType::ALL.len());

        for api_type in ApiType::ALL {
            let stale = self.service.should_update(api_type).await?;
            if stale {
                match self.service.last_update_time(api_type).await? {
                    Some(last_update) => warn!(
                        "{} data is STALE, last refresh at {}",
                        api_type, last_update
                    ),
                    None => info!("{} data was never refreshed", api_type),
                }
            } else {
                let next_update = self.service.next_update_time(api_type).await?;
                debug!("{} data is FRESH until {}", api_type, next_update);
            }
            states.push((api_type, stale));
        }

        Ok(states)
    }

    /// Запускает планировщик в фоне, если он включён в конфигурации
    pub fn start(self) -> Option<tokio::task::JoinHandle<()>> {
        if !self.config.enabled {
            info!("Staleness monitor is disabled in configuration");
            return None;
        }

        let interval_seconds = self.config.interval_seconds.max(1);
        info!(
            "Starting staleness monitor with interval of {} seconds",
            interval_seconds
        );

        Some(tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(interval_seconds));
            interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                match self.run_if_allowed().await {
                    Ok(Some(states)) => {
                        let stale = states.iter().filter(|(_, stale)| *stale).count();
                        debug!("Staleness check done: {}/{} feeds due", stale, states.len());
                    }
                    Ok(None) => {}
                    Err(e) => error!("Staleness check failed: {}", e),
                }
            }
        }))
    }
}
