// File: src/services/update_control/service.rs
use crate::db::postgres::models::api_update_control::ApiType;
use crate::db::postgres::repository::api_update_control_repository::TraitApiUpdateControlRepository;
use crate::utils::time_provider::TimeProvider;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::Error as SqlxError;
use std::sync::Arc;
use tracing::{debug, info};

/// Answer for a single feed, sampled at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCheck {
    pub should_update: bool,
    pub next_update: DateTime<Utc>,
    pub last_update: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUpdateStatus {
    #[serde(rename = "type")]
    pub api_type: ApiType,
    pub last_update: DateTime<Utc>,
    pub next_update: DateTime<Utc>,
}

/// Decides whether an external feed may be refetched and records refreshes.
///
/// Holds no state of its own: the `api_update_control` row is the only
/// source of truth, so any number of instances may share one database.
/// `should_update` followed by `record_update` is not atomic; two callers
/// can both see a stale feed and both refresh it, which costs one extra
/// upstream call and nothing else.
pub struct UpdateControlService {
    repository: Arc<dyn TraitApiUpdateControlRepository + Send + Sync>,
    time_provider: Arc<dyn TimeProvider>,
}

impl UpdateControlService {
    pub fn new(
        repository: Arc<dyn TraitApiUpdateControlRepository + Send + Sync>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            repository,
            time_provider,
        }
    }

    /// True when nothing was recorded yet or the staleness window has passed.
    pub async fn should_update(&self, api_type: ApiType) -> Result<bool, SqlxError> {
        let now = self.time_provider.now();
        let should_update = match self.repository.find_by_api_type(api_type).await? {
            Some(control) => now > control.next_update(),
            None => true,
        };

        debug!("should_update({}) = {}", api_type, should_update);
        Ok(should_update)
    }

    pub async fn record_update(&self, api_type: ApiType) -> Result<(), SqlxError> {
        let now = self.time_provider.now();
        let record = self
            .repository
            .upsert(api_type, now, api_type.update_interval_minutes())
            .await?;

        info!(
            "Recorded {} refresh at {}, next refresh after {}",
            api_type,
            record.last_update,
            record.next_update()
        );
        Ok(())
    }

    /// Deadline of the current window, or now when nothing was recorded.
    pub async fn next_update_time(&self, api_type: ApiType) -> Result<DateTime<Utc>, SqlxError> {
        Ok(self
            .repository
            .find_by_api_type(api_type)
            .await?
            .map(|control| control.next_update())
            .unwrap_or_else(|| self.time_provider.now()))
    }

    pub async fn last_update_time(
        &self,
        api_type: ApiType,
    ) -> Result<Option<DateTime<Utc>>, SqlxError> {
        Ok(self
            .repository
            .find_by_api_type(api_type)
            .await?
            .map(|control| control.last_update))
    }

    /// `should_update`, `next_update_time` and `last_update_time` from one
    /// read and one clock sample.
    pub async fn check(&self, api_type: ApiType) -> Result<UpdateCheck, SqlxError> {
        let now = self.time_provider.now();
        let check = match self.repository.find_by_api_type(api_type).await? {
            Some(control) => UpdateCheck {
                should_update: now > control.next_update(),
                next_update: control.next_update(),
                last_update: Some(control.last_update),
            },
            None => UpdateCheck {
                should_update: true,
                next_update: now,
                last_update: None,
            },
        };
        Ok(check)
    }

    pub async fn all_statuses(&self) -> Result<Vec<ApiUpdateStatus>, SqlxError> {
        let records = self.repository.find_all().await?;
        Ok(records
            .into_iter()
            .map(|control| ApiUpdateStatus {
                api_type: control.api_type,
                last_update: control.last_update,
                next_update: control.next_update(),
            })
            .collect())
    }
}
