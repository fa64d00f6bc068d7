//! Request types for the Teller Shift Engine API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Breakdown;

/// Request body for `POST /shifts/open`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenShiftRequest {
    /// The register code, e.g. `CAJ01`.
    pub register_code: String,
    /// The teller code, e.g. `USU01`.
    pub teller_code: String,
    /// The cash count handed to the teller.
    pub initial_breakdown: Breakdown,
}

/// Request body for `POST /transactions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// The shift the transaction belongs to.
    pub shift_code: String,
    /// The transaction kind, matched case-insensitively.
    pub kind: String,
    /// The bills exchanged.
    pub breakdown: Breakdown,
    /// Optional declared amount; must agree with the breakdown total.
    #[serde(default)]
    pub declared_amount: Option<Decimal>,
}

/// Request body for `POST /shifts/close`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseShiftRequest {
    /// The shift to close.
    pub shift_code: String,
    /// The physically counted final cash.
    pub final_breakdown: Breakdown,
}

/// Query parameters for `GET /shifts/:shift_code/transactions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryFilter {
    /// Restrict the listing to one transaction kind.
    #[serde(default)]
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_request_deserialization() {
        let json = r#"{
            "shift_code": "CAJ01-USU01-20250709",
            "kind": "deposit",
            "breakdown": [{"value": 100, "count": 3}, {"value": 50, "count": 4}]
        }"#;

        let request: TransactionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.kind, "deposit");
        assert_eq!(request.breakdown.total(), Decimal::from(500));
        assert_eq!(request.declared_amount, None);
    }

    #[test]
    fn test_declared_amount_accepts_string() {
        let json = r#"{
            "shift_code": "CAJ01-USU01-20250709",
            "kind": "WITHDRAWAL",
            "breakdown": [{"value": 20, "count": 1}],
            "declared_amount": "20.00"
        }"#;

        let request: TransactionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.declared_amount, Some(Decimal::new(2000, 2)));
    }

    #[test]
    fn test_open_request_requires_breakdown() {
        let json = r#"{"register_code": "CAJ01", "teller_code": "USU01"}"#;
        let result: Result<OpenShiftRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
