use super::models::{app_config::AppConfig, app_env::Env};
use std::fs;
use std::path::Path;

const CONFIG_DIR: &str = "config";

impl AppConfig {
    /// Loads `config/{env}.toml`.
    pub fn new(env: &Env) -> AppConfig {
        let path = Path::new(CONFIG_DIR).join(format!("{}.toml", env));
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read config file {}: {}", path.display(), e));

        AppConfig::from_toml_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse config file {}: {}", path.display(), e))
    }

    pub fn from_toml_str(content: &str) -> Result<AppConfig, toml::de::Error> {
        toml::from_str(content)
    }
}
