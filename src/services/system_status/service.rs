use crate::env_config::models::app_config::SystemStatusConfig;
use crate::utils::time_provider::TimeProvider;
use chrono::{Datelike, Timelike, Weekday};
use chrono_tz::Tz;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum SystemStatusError {
    #[error("unknown timezone {0}")]
    InvalidTimezone(String),
    #[error("invalid business hours {from}..{to}")]
    InvalidHours { from: u32, to: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub active: bool,
    pub is_production: bool,
    pub current_time: String,
    pub current_day: String,
    pub from_hour: u32,
    pub to_hour: u32,
    pub is_weekday: bool,
    pub is_within_hours: bool,
    pub message: String,
}

/// Reports whether the application is inside its production business window.
pub struct SystemStatusService {
    timezone: Tz,
    from_hour: u32,
    to_hour: u32,
    is_production: bool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SystemStatusService {
    pub fn new(
        config: &SystemStatusConfig,
        is_production: bool,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Result<Self, SystemStatusError> {
        let timezone: Tz = config
            .timezone
            .parse()
            .map_err(|_| SystemStatusError::InvalidTimezone(config.timezone.clone()))?;

        if config.from_hour >= config.to_hour || config.to_hour > 24 {
            return Err(SystemStatusError::InvalidHours {
                from: config.from_hour,
                to: config.to_hour,
            });
        }

        Ok(Self {
            timezone,
            from_hour: config.from_hour,
            to_hour: config.to_hour,
            is_production,
            time_provider,
        })
    }

    pub fn status(&self) -> SystemStatus {
        let now = self.time_provider.now().with_timezone(&self.timezone);
        let current_time = now.format("%H:%M").to_string();
        let current_day = now.format("%A").to_string().to_uppercase();

        if !self.is_production {
            return SystemStatus {
                active: true,
                is_production: false,
                current_time,
                current_day,
                from_hour: self.from_hour,
                to_hour: self.to_hour,
                is_weekday: true,
                is_within_hours: true,
                message: "Application in development mode - always active".to_string(),
            };
        }

        let is_weekday = !matches!(now.weekday(), Weekday::Sat | Weekday::Sun);
        let hour = now.hour();
        let is_within_hours = hour >= self.from_hour && hour < self.to_hour;
        let active = is_weekday && is_within_hours;

        let message = if active {
            "Application is active and running normally".to_string()
        } else if !is_weekday {
            "Application is closed during the weekend".to_string()
        } else if hour < self.from_hour {
            format!("Application will be available today at {}:00.", self.from_hour)
        } else {
            format!(
                "Application will be available tomorrow at {}:00.",
                self.from_hour
            )
        };

        SystemStatus {
            active,
            is_production: true,
            current_time,
            current_day,
            from_hour: self.from_hour,
            to_hour: self.to_hour,
            is_weekday,
            is_within_hours,
            message,
        }
    }
}
