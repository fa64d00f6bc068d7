//! Input validation for the Teller Shift Engine.
//!
//! The [`Validator`] is built once from [`ValidationRules`] and owns an
//! immutable copy of them: the recognized denominations and the compiled
//! identifier patterns. Every check returns a `bool` and never fails; callers
//! turn a `false` into an [`EngineError::Validation`](crate::error::EngineError)
//! with a message suited to their context.
//!
//! # Example
//!
//! ```
//! use teller_shift_engine::config::ValidationRules;
//! use teller_shift_engine::models::Breakdown;
//! use teller_shift_engine::validation::Validator;
//!
//! let validator = Validator::new(&ValidationRules::default()).unwrap();
//! let breakdown: Breakdown = [(100, 3), (50, 4)].into_iter().collect();
//!
//! assert!(validator.validate_breakdown(&breakdown));
//! assert!(validator.validate_register_code("CAJ01"));
//! assert!(!validator.validate_teller_code("USER1"));
//! ```

mod denomination;
mod identifier;

use regex::Regex;

use crate::config::ValidationRules;
use crate::error::{EngineError, EngineResult};

/// Validates breakdowns, identifiers and transaction kinds.
#[derive(Debug, Clone)]
pub struct Validator {
    denominations: Vec<u32>,
    register_code: Regex,
    teller_code: Regex,
    shift_code: Regex,
}

impl Validator {
    /// Builds a validator from the given rules.
    ///
    /// Fails with `ConfigParseError` if an identifier pattern is not a valid
    /// regular expression.
    pub fn new(rules: &ValidationRules) -> EngineResult<Self> {
        Ok(Self {
            denominations: rules.denominations.clone(),
            register_code: compile("register_code_pattern", &rules.register_code_pattern)?,
            teller_code: compile("teller_code_pattern", &rules.teller_code_pattern)?,
            shift_code: compile("shift_code_pattern", &rules.shift_code_pattern)?,
        })
    }

    /// Returns the recognized bill values in their configured order.
    pub fn denominations(&self) -> &[u32] {
        &self.denominations
    }
}

fn compile(name: &str, pattern: &str) -> EngineResult<Regex> {
    Regex::new(pattern).map_err(|e| EngineError::ConfigParseError {
        path: format!("validation.{}", name),
        message: e.to_string(),
    })
}
