//! Denomination breakdown validation and totals.

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::Breakdown;

use super::Validator;

impl Validator {
    /// Checks that a breakdown is non-empty, uses only recognized bill values
    /// and has no negative counts.
    pub fn validate_breakdown(&self, breakdown: &Breakdown) -> bool {
        if breakdown.is_empty() {
            warn!("Empty denomination breakdown");
            return false;
        }

        breakdown.entries().iter().all(|entry| {
            if !self.denominations.contains(&entry.value) {
                warn!(
                    value = entry.value,
                    valid = ?self.denominations,
                    "Unrecognized bill value"
                );
                return false;
            }
            if entry.count < 0 {
                warn!(value = entry.value, count = entry.count, "Negative bill count");
                return false;
            }
            true
        })
    }

    /// Returns the monetary total of a breakdown; zero when empty.
    pub fn total(&self, breakdown: &Breakdown) -> Decimal {
        breakdown.total()
    }
}
