//! Register, teller and shift code validation.

use regex::Regex;
use tracing::warn;

use crate::models::EntryKind;

use super::Validator;

impl Validator {
    /// Checks a register code, e.g. `CAJ01`.
    pub fn validate_register_code(&self, code: &str) -> bool {
        matches_code("register_code", &self.register_code, code)
    }

    /// Checks a teller code, e.g. `USU01`.
    pub fn validate_teller_code(&self, code: &str) -> bool {
        matches_code("teller_code", &self.teller_code, code)
    }

    /// Checks a shift code, e.g. `CAJ01-USU01-20250709`.
    pub fn validate_shift_code(&self, code: &str) -> bool {
        matches_code("shift_code", &self.shift_code, code)
    }

    /// Checks a transaction kind name, ignoring case.
    pub fn validate_entry_kind(&self, kind: &str) -> bool {
        match kind.parse::<EntryKind>() {
            Ok(_) => true,
            Err(_) => {
                warn!(kind = %kind, "Unrecognized transaction kind");
                false
            }
        }
    }
}

fn matches_code(field: &str, pattern: &Regex, code: &str) -> bool {
    if code.trim().is_empty() {
        warn!(field = %field, "Blank identifier");
        return false;
    }

    let valid = pattern.is_match(code);
    if !valid {
        warn!(field = %field, code = %code, pattern = %pattern, "Malformed identifier");
    }
    valid
}
