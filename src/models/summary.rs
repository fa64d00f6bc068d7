//! Read models aggregated from shifts and their ledgers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LedgerEntry, Shift, ShiftState};

/// Reconciliation view of a single shift.
///
/// `declared_amount` and `discrepancy` are only present once the shift is
/// closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSummary {
    /// The shift being summarized.
    pub shift: Shift,
    /// The full ledger, oldest entry first.
    pub entries: Vec<LedgerEntry>,
    /// Initial amount plus all deposit and withdrawal movements.
    pub theoretical_amount: Decimal,
    /// The final amount declared at close.
    pub declared_amount: Option<Decimal>,
    /// Declared minus theoretical balance at close.
    pub discrepancy: Option<Decimal>,
    /// Number of ledger entries, including OPENING and CLOSING.
    pub transaction_count: usize,
    /// The shift's current state.
    pub state: ShiftState,
}

/// Activity snapshot for a teller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TellerStatus {
    /// The teller code.
    pub teller_code: String,
    /// Whether the teller currently holds an open shift.
    pub has_open_shift: bool,
    /// The teller's open shift, if any.
    pub active_shift: Option<Shift>,
    /// Ledger entries recorded by the teller across all shifts.
    pub total_transactions: usize,
    /// Timestamp of the teller's most recent ledger entry.
    pub last_activity: Option<DateTime<Utc>>,
}
