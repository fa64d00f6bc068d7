//! Transaction processing.
//!
//! Validates and records single ledger entries against an open shift,
//! applying the sign convention of the entry kind.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Breakdown, EntryKind, LedgerEntry};
use crate::store::{LedgerStore, ShiftStore};

use super::EngineContext;
use super::locks::shift_key;

/// Records and queries ledger entries.
pub struct TransactionProcessor<S, L> {
    ctx: Arc<EngineContext<S, L>>,
}

impl<S, L> Clone for TransactionProcessor<S, L> {
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
        }
    }
}

impl<S: ShiftStore, L: LedgerStore> TransactionProcessor<S, L> {
    pub(crate) fn new(ctx: Arc<EngineContext<S, L>>) -> Self {
        Self { ctx }
    }

    /// Records a transaction against an open shift.
    ///
    /// `kind` is matched case-insensitively. When `declared_amount` is given
    /// its magnitude must equal the breakdown total. The recorded amount is
    /// always the breakdown total, signed by kind.
    ///
    /// # Errors
    ///
    /// - `Validation` for a malformed shift code, unknown kind, invalid
    ///   breakdown or mismatched declared amount.
    /// - `ShiftNotFound` if no shift has this code.
    /// - `ShiftNotOpen` if the shift is closed.
    pub async fn process(
        &self,
        shift_code: &str,
        kind: &str,
        breakdown: Breakdown,
        declared_amount: Option<Decimal>,
    ) -> EngineResult<LedgerEntry> {
        self.require_shift_code(shift_code)?;
        if !self.ctx.validator.validate_entry_kind(kind) {
            return Err(EngineError::validation(
                "kind",
                format!("Unknown transaction kind: '{}'", kind),
            ));
        }
        let kind: EntryKind = kind.parse()?;

        let _guard = self.ctx.locks.lock(shift_key(shift_code)).await;
        self.record(shift_code, kind, breakdown, declared_amount)
            .await
    }

    /// Records an entry without taking the shift lock.
    ///
    /// Callers must already hold the lock for `shift_code`.
    pub(crate) async fn record(
        &self,
        shift_code: &str,
        kind: EntryKind,
        breakdown: Breakdown,
        declared_amount: Option<Decimal>,
    ) -> EngineResult<LedgerEntry> {
        if !self.ctx.validator.validate_breakdown(&breakdown) {
            return Err(EngineError::validation(
                "breakdown",
                "Breakdown must be non-empty, use recognized bill values and non-negative counts",
            ));
        }

        let total = self.ctx.validator.total(&breakdown);
        let amount = self.resolve_amount(total, declared_amount)?;

        let shift = self
            .ctx
            .shifts
            .find_by_shift_code(shift_code)
            .await?
            .ok_or_else(|| EngineError::ShiftNotFound {
                shift_code: shift_code.to_string(),
            })?;

        if !shift.is_open() {
            warn!(shift_code = %shift_code, kind = %kind, "Transaction rejected on closed shift");
            return Err(EngineError::ShiftNotOpen {
                shift_code: shift_code.to_string(),
            });
        }

        let entry = LedgerEntry {
            id: Uuid::new_v4(),
            register_code: shift.register_code,
            teller_code: shift.teller_code,
            shift_code: shift.shift_code,
            kind,
            amount: kind.signed(amount),
            breakdown,
            recorded_at: self.ctx.clock.now(),
        };

        let entry = self.ctx.ledger.insert(entry).await?;
        info!(
            shift_code = %entry.shift_code,
            entry_id = %entry.id,
            kind = %entry.kind,
            amount = %entry.amount,
            "Transaction recorded"
        );
        Ok(entry)
    }

    fn resolve_amount(&self, total: Decimal, declared: Option<Decimal>) -> EngineResult<Decimal> {
        let Some(declared) = declared else {
            return Ok(total);
        };

        if declared.abs() != total {
            return Err(EngineError::validation(
                "declared_amount",
                format!(
                    "Declared amount {} does not match breakdown total {}",
                    declared, total
                ),
            ));
        }
        Ok(total)
    }

    fn require_shift_code(&self, shift_code: &str) -> EngineResult<()> {
        if self.ctx.validator.validate_shift_code(shift_code) {
            return Ok(());
        }
        Err(EngineError::validation(
            "shift_code",
            format!("Malformed shift code: '{}'", shift_code),
        ))
    }

    /// Returns a shift's entries, oldest first.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed shift code.
    pub async fn entries_for_shift(&self, shift_code: &str) -> EngineResult<Vec<LedgerEntry>> {
        self.require_shift_code(shift_code)?;
        Ok(self.ctx.ledger.find_by_shift_code(shift_code).await?)
    }

    /// Returns a teller's entries across all shifts, newest first.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed teller code.
    pub async fn entries_for_teller(&self, teller_code: &str) -> EngineResult<Vec<LedgerEntry>> {
        if !self.ctx.validator.validate_teller_code(teller_code) {
            return Err(EngineError::validation(
                "teller_code",
                format!("Malformed teller code: '{}'", teller_code),
            ));
        }
        Ok(self.ctx.ledger.find_by_teller(teller_code).await?)
    }

    /// Returns a shift's entries of one kind, oldest first.
    pub async fn entries_for_shift_by_kind(
        &self,
        shift_code: &str,
        kind: EntryKind,
    ) -> EngineResult<Vec<LedgerEntry>> {
        self.require_shift_code(shift_code)?;
        Ok(self
            .ctx
            .ledger
            .find_by_shift_code_and_kind(shift_code, kind)
            .await?)
    }

    /// Counts a shift's entries, OPENING and CLOSING included.
    pub async fn count_for_shift(&self, shift_code: &str) -> EngineResult<usize> {
        Ok(self.ctx.ledger.count_by_shift_code(shift_code).await?)
    }

    /// Sums the signed amounts of a shift's DEPOSIT and WITHDRAWAL entries.
    pub async fn movement_for_shift(&self, shift_code: &str) -> EngineResult<Decimal> {
        let entries = self.entries_for_shift(shift_code).await?;
        let movement = movement(&entries);
        debug!(shift_code = %shift_code, movement = %movement, "Computed shift movement");
        Ok(movement)
    }
}

/// Sums signed amounts, skipping OPENING and CLOSING entries.
pub(crate) fn movement(entries: &[LedgerEntry]) -> Decimal {
    entries
        .iter()
        .filter(|e| !e.kind.is_boundary())
        .map(|e| e.amount)
        .sum()
}
