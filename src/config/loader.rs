//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use rust_decimal::Decimal;
use std::env;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, ReconciliationConfig, ServerConfig, ValidationRules};

/// Environment variable holding the path to the configuration file.
pub const CONFIG_PATH_ENV: &str = "SHIFT_ENGINE_CONFIG";

/// Environment variable overriding the server port.
pub const PORT_ENV: &str = "SHIFT_ENGINE_PORT";

/// Loads and provides access to the engine configuration.
///
/// # File Format
///
/// ```yaml
/// validation:
///   denominations: [1, 5, 10, 20, 50, 100]
///   register_code_pattern: '^CAJ[0-9]{2}$'
///   teller_code_pattern: '^USU[0-9]{2}$'
///   shift_code_pattern: '^CAJ[0-9]{2}-USU[0-9]{2}-[0-9]{8}$'
/// reconciliation:
///   alert_tolerance: "0.01"
/// server:
///   host: 0.0.0.0
///   port: 8080
/// ```
///
/// Omitted sections and fields fall back to their defaults.
///
/// # Example
///
/// ```no_run
/// use teller_shift_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/engine.yaml").unwrap();
/// println!("Denominations: {:?}", loader.validation().denominations);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or invalid values (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: EngineConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        Self::check(&config).map_err(|message| EngineError::ConfigParseError {
            path: path_str,
            message,
        })?;

        Ok(Self { config })
    }

    /// Loads configuration as directed by the environment.
    ///
    /// Reads the file named by `SHIFT_ENGINE_CONFIG` when set, otherwise uses
    /// the built-in defaults. `SHIFT_ENGINE_PORT` overrides the server port.
    pub fn from_env() -> EngineResult<Self> {
        let mut loader = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                info!(path = %path, "Loading configuration file");
                Self::load(path)?
            }
            Err(_) => {
                info!("No configuration file set, using defaults");
                Self::default()
            }
        };

        if let Ok(port) = env::var(PORT_ENV) {
            loader.config.server.port =
                port.trim()
                    .parse()
                    .map_err(|_| EngineError::ConfigParseError {
                        path: PORT_ENV.to_string(),
                        message: format!("'{}' is not a valid port", port),
                    })?;
        }

        Ok(loader)
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Rejects configurations the engine cannot run with.
    fn check(config: &EngineConfig) -> Result<(), String> {
        if config.validation.denominations.is_empty() {
            return Err("validation.denominations must not be empty".to_string());
        }
        if config.validation.denominations.contains(&0) {
            return Err("validation.denominations must not contain 0".to_string());
        }
        if config.reconciliation.alert_tolerance < Decimal::ZERO {
            return Err("reconciliation.alert_tolerance must not be negative".to_string());
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the validation rules.
    pub fn validation(&self) -> &ValidationRules {
        &self.config.validation
    }

    /// Returns the reconciliation settings.
    pub fn reconciliation(&self) -> &ReconciliationConfig {
        &self.config.reconciliation
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }
}
