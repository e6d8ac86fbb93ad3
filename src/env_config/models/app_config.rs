use chrono::NaiveTime;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub log: LogConfig,
    pub postgres: PostgresConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub system_status: SystemStatusConfig,
    #[serde(default)]
    pub staleness_monitor: StalenessMonitorConfig,
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize)]
pub struct PostgresConfig {
    pub timeout: u64,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: u64,
    pub idle_timeout: u64,
    #[serde(default)]
    pub run_migrations: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct CorsConfig {
    /// Empty list means any origin is accepted.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Business window reported by `/api/system/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatusConfig {
    pub timezone: String,
    pub from_hour: u32,
    pub to_hour: u32,
}

impl Default for SystemStatusConfig {
    fn default() -> Self {
        Self {
            timezone: "Europe/Madrid".to_string(),
            from_hour: 10,
            to_hour: 19,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StalenessMonitorConfig {
    pub enabled: bool,
    pub interval_seconds: u64,
    #[serde(default)]
    pub start_time: Option<String>, // UTC, "HH:MM:SS"
    #[serde(default)]
    pub end_time: Option<String>, // UTC, "HH:MM:SS"
}

impl Default for StalenessMonitorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_seconds: 60,
            start_time: None,
            end_time: None,
        }
    }
}

impl StalenessMonitorConfig {
    /// Checks if `now` (UTC wall time) is within the allowed operation window
    pub fn is_operation_allowed_at(&self, now: NaiveTime) -> bool {
        // If no time window is configured, always allow operation
        let (Some(start_str), Some(end_str)) = (&self.start_time, &self.end_time) else {
            return true;
        };

        match (
            NaiveTime::parse_from_str(start_str, "%H:%M:%S"),
            NaiveTime::parse_from_str(end_str, "%H:%M:%S"),
        ) {
            (Ok(start), Ok(end)) if start <= end => start <= now && now <= end,
            // Window crosses midnight, e.g. start=21:00:00, end=04:00:00
            (Ok(start), Ok(end)) => start <= now || now <= end,
            // If parsing fails, default to allowing operation
            _ => true,
        }
    }
}
