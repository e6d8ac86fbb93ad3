use super::models::app_env::{AppEnv, Env};
use std::env;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    #[error("ENV -> {0} is not set")]
    Missing(&'static str),
    #[error("ENV -> {name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl AppEnv {
    /// Reads the process environment, panics with the offending variable name.
    pub fn new() -> AppEnv {
        AppEnv::from_lookup(|name| env::var(name).ok())
            .unwrap_or_else(|e| panic!("Invalid environment: {}", e))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<AppEnv, EnvError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str| lookup(name).ok_or(EnvError::Missing(name));

        let env_value = var("ENV")?;
        let env = env_value.parse::<Env>().map_err(|reason| EnvError::Invalid {
            name: "ENV",
            value: env_value.clone(),
            reason,
        })?;

        let port_value = var("SERVER_PORT")?;
        let server_port = port_value.parse::<u16>().map_err(|e| EnvError::Invalid {
            name: "SERVER_PORT",
            value: port_value.clone(),
            reason: e.to_string(),
        })?;

        Ok(AppEnv {
            env,
            server_port,
            server_address: var("SERVER_ADDRESS")?,
            postgres_host: var("POSTGRES_HOST")?,
            postgres_user: var("POSTGRES_USER")?,
            postgres_password: var("POSTGRES_PASSWORD")?,
            postgres_database: var("POSTGRES_DATABASE")?,
        })
    }
}
