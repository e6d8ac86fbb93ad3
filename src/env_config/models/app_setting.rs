use super::{app_config::AppConfig, app_env::AppEnv};

#[derive(Debug)]
pub struct AppSettings {
    pub app_config: AppConfig,
    pub app_env: AppEnv,
}

#[cfg(test)]
impl AppSettings {
    /// Settings built from `config/local.toml` semantics without touching the
    /// process environment.
    pub fn for_tests(env: super::app_env::Env) -> Self {
        use super::app_config::{
            CorsConfig, LogConfig, PostgresConfig, StalenessMonitorConfig, SystemStatusConfig,
        };

        Self {
            app_config: AppConfig {
                log: LogConfig {
                    level: "debug".to_string(),
                    format: "plain".to_string(),
                },
                postgres: PostgresConfig {
                    timeout: 5,
                    max_connections: 2,
                    min_connections: 1,
                    max_lifetime: 60,
                    idle_timeout: 60,
                    run_migrations: false,
                },
                cors: CorsConfig::default(),
                system_status: SystemStatusConfig::default(),
                staleness_monitor: StalenessMonitorConfig::default(),
            },
            app_env: AppEnv {
                env,
                server_port: 8080,
                server_address: "127.0.0.1".to_string(),
                postgres_host: "localhost:5432".to_string(),
                postgres_user: "test".to_string(),
                postgres_password: "test".to_string(),
                postgres_database: "test".to_string(),
            },
        }
    }
}
