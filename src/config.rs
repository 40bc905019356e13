/**
* filename : config
* author : HAMA
* date: 2025. 5. 8.
* description: layered service configuration (defaults, config file, environment)
**/

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::StockError;

/// Environment variable that points at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "STOCKLENS_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub name: String,
    pub base_url: String,
    pub timeout_ms: Option<u64>,
    pub use_mock: bool,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    /// Load configuration: defaults, then `config.{json,toml}` (or the file named by
    /// `STOCKLENS_CONFIG`), then `STOCKLENS__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self, StockError> {
        let defaults = config::Config::try_from(&Config::default())?;

        let file = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => config::File::with_name(&path).required(true),
            _ => config::File::with_name("config").required(false),
        };

        let mut cfg: Config = config::Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("STOCKLENS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Flat environment overrides kept for container deployments
    fn apply_env_overrides(&mut self) {
        use std::env;
        if let Ok(v) = env::var("PORT") {
            if let Ok(port) = v.parse::<u16>() { self.server.port = port; }
        }
        if let Ok(v) = env::var("PROVIDER_BASE_URL") { if !v.is_empty() { self.provider.base_url = v; } }
        if let Ok(v) = env::var("USE_MOCK") {
            let lower = v.to_lowercase();
            if ["1", "true", "yes"].contains(&lower.as_str()) { self.provider.use_mock = true; }
            if ["0", "false", "no"].contains(&lower.as_str()) { self.provider.use_mock = false; }
        }
    }

    fn validate(&self) -> Result<(), StockError> {
        if self.server.host.trim().is_empty() {
            return Err(StockError::ConfigError("server.host must not be empty".to_string()));
        }
        if !self.provider.use_mock && self.provider.base_url.trim().is_empty() {
            return Err(StockError::ConfigError(
                "provider.base_url is required unless provider.use_mock is set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(10_000))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            provider: ProviderConfig {
                name: "Yahoo Finance".to_string(),
                base_url: "https://query1.finance.yahoo.com".to_string(),
                timeout_ms: Some(10_000),
                use_mock: false,
                user_agent: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.bind_address(), "127.0.0.1:5000");
        assert_eq!(cfg.provider.timeout(), Duration::from_millis(10_000));
    }

    #[test]
    fn test_empty_base_url_rejected_without_mock() {
        let mut cfg = Config::default();
        cfg.provider.base_url = String::new();
        assert!(cfg.validate().is_err());

        cfg.provider.use_mock = true;
        assert!(cfg.validate().is_ok());
    }
}
