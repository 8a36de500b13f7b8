//! Pool Configuration Module
//!
//! Loads the settlement asset, module parameters and log level for a pool
//! host. Supports a TOML file with `RESERVOIR_` environment overrides;
//! nested keys use a double underscore
//! (`RESERVOIR_PARAMS__MIN_CREATE_POOL_THRESHOLD=500`).

use crate::params::Params;
use anyhow::{ensure, Context, Result};
use config_crate::{Config, Environment, File, Map};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "RESERVOIR";

/// Longest accepted asset ticker
pub const MAX_TICKER_LEN: usize = 64;

const DEFAULT_CONFIG_PATH: &str = "config/pools.toml";

/// Main pool configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PoolConfig {
    /// Ticker every pool pairs against
    pub settlement_asset: String,

    /// Module parameters
    #[serde(default)]
    pub params: Params,

    /// Default tracing filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl PoolConfig {
    /// Load configuration from a TOML file with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    /// Same as [`PoolConfig::load`] but reads overrides from `env` instead of
    /// the process environment
    pub fn load_from(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let base = path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
        debug!("Loading pool config from {:?}", base);

        let config = Config::builder()
            .add_source(File::from(base).required(true))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: PoolConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;

        info!(
            settlement_asset = %config.settlement_asset,
            min_create_pool_threshold = config.params.min_create_pool_threshold,
            "Loaded pool configuration"
        );
        Ok(config)
    }

    /// Reject configurations the pool core cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_TICKER_LEN).contains(&self.settlement_asset.len()),
            "settlement_asset '{}' must be 1-{} characters",
            self.settlement_asset,
            MAX_TICKER_LEN
        );
        ensure!(
            self.settlement_asset
                .chars()
                .all(|c| c.is_ascii_alphanumeric()),
            "settlement_asset '{}' must be alphanumeric",
            self.settlement_asset
        );
        Ok(())
    }

    /// Render as TOML, e.g. to write a starter config file
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_base_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("pools.toml");

        let config_content = r#"
settlement_asset = "stake"
log_level = "debug"

[params]
min_create_pool_threshold = 250
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = PoolConfig::load_from(Some(&config_path), Some(Map::new())).unwrap();

        assert_eq!(config.settlement_asset, "stake");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.params.min_create_pool_threshold, 250);
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("pools.toml");
        fs::write(&config_path, "settlement_asset = \"stake\"\n").unwrap();

        let config = PoolConfig::load_from(Some(&config_path), Some(Map::new())).unwrap();

        assert_eq!(config.params, Params::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_environment_override() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("pools.toml");
        fs::write(&config_path, "settlement_asset = \"stake\"\n").unwrap();

        let mut env = Map::new();
        env.insert(
            "RESERVOIR_PARAMS__MIN_CREATE_POOL_THRESHOLD".to_string(),
            "5000".to_string(),
        );
        env.insert("RESERVOIR_SETTLEMENT_ASSET".to_string(), "base".to_string());

        let config = PoolConfig::load_from(Some(&config_path), Some(env)).unwrap();

        assert_eq!(config.settlement_asset, "base");
        assert_eq!(config.params.min_create_pool_threshold, 5000);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = PoolConfig::load_from(Some(&dir.path().join("absent.toml")), Some(Map::new()));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_settlement_asset_rejected() {
        let config = PoolConfig {
            settlement_asset: "not valid".to_string(),
            params: Params::default(),
            log_level: default_log_level(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_settlement_asset_length_bounds() {
        let with_asset = |settlement_asset: String| PoolConfig {
            settlement_asset,
            params: Params::default(),
            log_level: default_log_level(),
        };
        assert!(with_asset(String::new()).validate().is_err());
        assert!(with_asset("x".repeat(MAX_TICKER_LEN)).validate().is_ok());
        assert!(with_asset("x".repeat(MAX_TICKER_LEN + 1)).validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PoolConfig {
            settlement_asset: "stake".to_string(),
            params: Params {
                min_create_pool_threshold: 42,
            },
            log_level: "warn".to_string(),
        };
        let rendered = config.to_toml().unwrap();
        let parsed: PoolConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
