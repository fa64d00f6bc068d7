//! Configuration types for the shift engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section has
//! defaults, so a partial file (or no file at all) yields a usable config.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Input validation rules.
///
/// These values are fixed once loaded; the validator compiles the patterns
/// when it is constructed and never changes them afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Recognized bill values, in the order they are advertised to callers.
    pub denominations: Vec<u32>,
    /// Pattern a register code must match in full.
    pub register_code_pattern: String,
    /// Pattern a teller code must match in full.
    pub teller_code_pattern: String,
    /// Pattern a shift code must match in full.
    pub shift_code_pattern: String,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            denominations: vec![1, 5, 10, 20, 50, 100],
            register_code_pattern: r"^CAJ[0-9]{2}$".to_string(),
            teller_code_pattern: r"^USU[0-9]{2}$".to_string(),
            shift_code_pattern: r"^CAJ[0-9]{2}-USU[0-9]{2}-[0-9]{8}$".to_string(),
        }
    }
}

/// Closing reconciliation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconciliationConfig {
    /// A discrepancy whose magnitude exceeds this value raises an alert.
    pub alert_tolerance: Decimal,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            alert_tolerance: Decimal::new(1, 2),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Validation rules.
    pub validation: ValidationRules,
    /// Reconciliation settings.
    pub reconciliation: ReconciliationConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
}
