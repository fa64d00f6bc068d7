//! Configuration loading and management for the Teller Shift Engine.
//!
//! This module provides functionality to load the engine configuration from a
//! YAML file: validation rules, reconciliation tolerance and server settings.
//!
//! # Example
//!
//! ```no_run
//! use teller_shift_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/engine.yaml").unwrap();
//! println!("Alert tolerance: {}", config.reconciliation().alert_tolerance);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_PATH_ENV, ConfigLoader, PORT_ENV};
pub use types::{EngineConfig, ReconciliationConfig, ServerConfig, ValidationRules};
