//! Read-side reports: shift reconciliation summaries and teller status.

use std::sync::Arc;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{ShiftSummary, TellerStatus};
use crate::store::{LedgerStore, ShiftStore};

use super::EngineContext;
use super::lifecycle::ShiftLifecycle;
use super::processor::movement;

/// Builds summaries and status snapshots. Never writes.
pub struct ShiftReports<S, L> {
    ctx: Arc<EngineContext<S, L>>,
    lifecycle: ShiftLifecycle<S, L>,
}

impl<S, L> Clone for ShiftReports<S, L> {
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
            lifecycle: self.lifecycle.clone(),
        }
    }
}

impl<S: ShiftStore, L: LedgerStore> ShiftReports<S, L> {
    pub(crate) fn new(ctx: Arc<EngineContext<S, L>>, lifecycle: ShiftLifecycle<S, L>) -> Self {
        Self { ctx, lifecycle }
    }

    /// Summarizes a shift's ledger and reconciliation figures.
    ///
    /// # Errors
    ///
    /// `ShiftNotFound` if no shift has this code.
    pub async fn summarize(&self, shift_code: &str) -> EngineResult<ShiftSummary> {
        let shift = self.lifecycle.find_shift(shift_code).await?;
        let entries = self.ctx.ledger.find_by_shift_code(shift_code).await?;

        let theoretical_amount = shift.initial_amount + movement(&entries);
        debug!(
            shift_code = %shift_code,
            theoretical = %theoretical_amount,
            entries = entries.len(),
            "Built shift summary"
        );

        Ok(ShiftSummary {
            theoretical_amount,
            declared_amount: shift.final_amount,
            discrepancy: shift.discrepancy,
            transaction_count: entries.len(),
            state: shift.state,
            entries,
            shift,
        })
    }

    /// Reports a teller's current shift and recorded activity.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed teller code.
    pub async fn teller_status(&self, teller_code: &str) -> EngineResult<TellerStatus> {
        if !self.ctx.validator.validate_teller_code(teller_code) {
            return Err(EngineError::validation(
                "teller_code",
                format!("Malformed teller code: '{}'", teller_code),
            ));
        }

        let active_shift = self.lifecycle.find_open_shift(teller_code).await?;
        let entries = self.ctx.ledger.find_by_teller(teller_code).await?;

        Ok(TellerStatus {
            teller_code: teller_code.to_string(),
            has_open_shift: active_shift.is_some(),
            active_shift,
            total_transactions: entries.len(),
            last_activity: entries.iter().map(|e| e.recorded_at).max(),
        })
    }
}
