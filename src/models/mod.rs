//! Core data models for the Teller Shift Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod denomination;
mod ledger_entry;
mod shift;
mod summary;

pub use denomination::{Breakdown, Denomination};
pub use ledger_entry::{EntryKind, LedgerEntry};
pub use shift::{Closing, Shift, ShiftState, shift_code};
pub use summary::{ShiftSummary, TellerStatus};
