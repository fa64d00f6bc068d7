//! Shift model and related types.
//!
//! This module defines the [`Shift`] struct and [`ShiftState`] enum for
//! representing one teller's custody period over a cash register.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Breakdown;

/// Lifecycle state of a shift. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftState {
    /// The teller holds the drawer and may record transactions.
    Open,
    /// The drawer has been counted and reconciled.
    Closed,
}

impl ShiftState {
    /// All states, in lifecycle order.
    pub const ALL: [ShiftState; 2] = [ShiftState::Open, ShiftState::Closed];

    /// Returns the wire name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftState::Open => "OPEN",
            ShiftState::Closed => "CLOSED",
        }
    }
}

impl std::fmt::Display for ShiftState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a shift code of the form `<register>-<teller>-<YYYYMMDD>`.
///
/// # Examples
///
/// ```
/// use teller_shift_engine::models::shift_code;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 7, 9).unwrap();
/// assert_eq!(shift_code("CAJ01", "USU01", date), "CAJ01-USU01-20250709");
/// ```
pub fn shift_code(register_code: &str, teller_code: &str, date: NaiveDate) -> String {
    format!("{}-{}-{}", register_code, teller_code, date.format("%Y%m%d"))
}

/// Closing figures applied to a shift when it is reconciled.
#[derive(Debug, Clone, PartialEq)]
pub struct Closing {
    /// When the shift was closed.
    pub closed_at: DateTime<Utc>,
    /// The physically counted final breakdown.
    pub final_breakdown: Breakdown,
    /// The total of the final breakdown.
    pub final_amount: Decimal,
    /// Declared final amount minus theoretical balance.
    pub discrepancy: Decimal,
    /// Whether the discrepancy exceeded the tolerance.
    pub discrepancy_alert: bool,
}

/// A teller's custody period over one cash register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique code, `<register>-<teller>-<YYYYMMDD>`.
    pub shift_code: String,
    /// The register (cash drawer) code, e.g. `CAJ01`.
    pub register_code: String,
    /// The teller code, e.g. `USU01`.
    pub teller_code: String,
    /// When the shift was opened.
    pub opened_at: DateTime<Utc>,
    /// The cash count received at opening.
    pub initial_breakdown: Breakdown,
    /// The total of the initial breakdown.
    pub initial_amount: Decimal,
    /// Current lifecycle state.
    pub state: ShiftState,
    /// When the shift was closed. Absent while open.
    pub closed_at: Option<DateTime<Utc>>,
    /// The cash count declared at closing. Absent while open.
    pub final_breakdown: Option<Breakdown>,
    /// The total of the final breakdown. Absent while open.
    pub final_amount: Option<Decimal>,
    /// Declared minus theoretical balance. Absent while open.
    pub discrepancy: Option<Decimal>,
    /// Raised when the discrepancy exceeds the tolerance. False while open.
    pub discrepancy_alert: bool,
}

impl Shift {
    /// Creates a new open shift.
    pub fn open(
        shift_code: String,
        register_code: String,
        teller_code: String,
        opened_at: DateTime<Utc>,
        initial_breakdown: Breakdown,
    ) -> Self {
        let initial_amount = initial_breakdown.total();
        Self {
            shift_code,
            register_code,
            teller_code,
            opened_at,
            initial_breakdown,
            initial_amount,
            state: ShiftState::Open,
            closed_at: None,
            final_breakdown: None,
            final_amount: None,
            discrepancy: None,
            discrepancy_alert: false,
        }
    }

    /// Returns true while the shift accepts transactions.
    pub fn is_open(&self) -> bool {
        self.state == ShiftState::Open
    }

    /// Returns the closed form of this shift with all closing fields populated.
    pub fn closed(&self, closing: Closing) -> Self {
        Self {
            state: ShiftState::Closed,
            closed_at: Some(closing.closed_at),
            final_breakdown: Some(closing.final_breakdown),
            final_amount: Some(closing.final_amount),
            discrepancy: Some(closing.discrepancy),
            discrepancy_alert: closing.discrepancy_alert,
            ..self.clone()
        }
    }
}
