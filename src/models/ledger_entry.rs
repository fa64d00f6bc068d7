//! Ledger entry model.
//!
//! A [`LedgerEntry`] records one cash movement against a shift. Entries are
//! append-only; the ordered sequence of entries for a shift is the source of
//! truth for its theoretical balance.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Breakdown;
use crate::error::EngineError;

/// The kind of cash movement recorded by a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    /// Synthetic entry recorded when the shift opens.
    Opening,
    /// Cash received by the teller.
    Deposit,
    /// Cash handed out by the teller.
    Withdrawal,
    /// Synthetic entry recorded when the shift closes.
    Closing,
}

impl EntryKind {
    /// All entry kinds.
    pub const ALL: [EntryKind; 4] = [
        EntryKind::Opening,
        EntryKind::Deposit,
        EntryKind::Withdrawal,
        EntryKind::Closing,
    ];

    /// Returns the wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Opening => "OPENING",
            EntryKind::Deposit => "DEPOSIT",
            EntryKind::Withdrawal => "WITHDRAWAL",
            EntryKind::Closing => "CLOSING",
        }
    }

    /// Returns true for the synthetic OPENING and CLOSING entries, which are
    /// not folded into the transaction movement of a shift.
    pub fn is_boundary(&self) -> bool {
        matches!(self, EntryKind::Opening | EntryKind::Closing)
    }

    /// Applies the sign convention for this kind to an amount.
    ///
    /// # Examples
    ///
    /// ```
    /// use teller_shift_engine::models::EntryKind;
    /// use rust_decimal::Decimal;
    ///
    /// let amount = Decimal::from(500);
    /// assert_eq!(EntryKind::Deposit.signed(amount), Decimal::from(500));
    /// assert_eq!(EntryKind::Withdrawal.signed(amount), Decimal::from(-500));
    /// assert_eq!(EntryKind::Closing.signed(-amount), Decimal::from(-500));
    /// ```
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            EntryKind::Opening | EntryKind::Deposit => amount.abs(),
            EntryKind::Withdrawal => -amount.abs(),
            EntryKind::Closing => amount,
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = EngineError;

    /// Parses a kind name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        EntryKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == upper)
            .ok_or_else(|| {
                EngineError::validation(
                    "kind",
                    format!(
                        "unknown transaction kind '{}'; expected one of OPENING, DEPOSIT, WITHDRAWAL, CLOSING",
                        s
                    ),
                )
            })
    }
}

/// One recorded cash movement against a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier of the entry.
    pub id: Uuid,
    /// The register of the owning shift.
    pub register_code: String,
    /// The teller of the owning shift.
    pub teller_code: String,
    /// The owning shift.
    pub shift_code: String,
    /// What kind of movement this is.
    pub kind: EntryKind,
    /// Signed amount; its magnitude equals the breakdown total.
    pub amount: Decimal,
    /// The bills that moved.
    pub breakdown: Breakdown,
    /// When the entry was recorded.
    pub recorded_at: DateTime<Utc>,
}
