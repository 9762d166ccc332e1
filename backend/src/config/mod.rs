//! Configuration management for the Nutriplan backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: NUTRI__)

use anyhow::Result;
use nutriplan_shared::EngineConfig;
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    /// Calculation defaults: calorie floor, objective adjustments, fat
    /// method and meal template
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Prometheus exporter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            metrics: MetricsConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with NUTRI__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., NUTRI__ENGINE__OBJECTIVE__CALORIE_FLOOR_KCAL=1400
            .add_source(config::Environment::with_prefix("NUTRI").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert!(config.metrics.enabled);
        assert_eq!(config.engine.objective.calorie_floor_kcal, 1200.0);
    }

    #[test]
    fn test_defaults_survive_config_round_trip() {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default()).unwrap())
            .build()
            .unwrap();
        let loaded: AppConfig = config.try_deserialize().unwrap();
        assert_eq!(loaded.engine, EngineConfig::default());
    }

    #[test]
    fn test_partial_engine_section() {
        let config = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                host = "0.0.0.0"
                port = 9000

                [engine.objective]
                calorie_floor_kcal = 1400.0
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let loaded: AppConfig = config.try_deserialize().unwrap();
        assert_eq!(loaded.engine.objective.calorie_floor_kcal, 1400.0);
        assert_eq!(loaded.engine.objective.weight_loss_deficit_kcal, 500.0);
        assert_eq!(loaded.engine.meal_template.slots.len(), 6);
    }
}
