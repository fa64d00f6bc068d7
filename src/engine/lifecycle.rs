//! Shift lifecycle: opening, closing and lookups.
//!
//! A shift moves `OPEN -> CLOSED` exactly once. Opening records an OPENING
//! ledger entry; closing records a CLOSING entry, reconciles the declared
//! count against the theoretical balance and only then persists the closed
//! state, conditioned on the shift still being open.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{Breakdown, Closing, EntryKind, Shift, ShiftState, shift_code};
use crate::store::{LedgerStore, ShiftStore};

use super::EngineContext;
use super::locks::{shift_key, teller_key};
use super::processor::TransactionProcessor;

/// Opens, closes and looks up shifts.
pub struct ShiftLifecycle<S, L> {
    ctx: Arc<EngineContext<S, L>>,
    processor: TransactionProcessor<S, L>,
}

impl<S, L> Clone for ShiftLifecycle<S, L> {
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
            processor: self.processor.clone(),
        }
    }
}

impl<S: ShiftStore, L: LedgerStore> ShiftLifecycle<S, L> {
    pub(crate) fn new(ctx: Arc<EngineContext<S, L>>, processor: TransactionProcessor<S, L>) -> Self {
        Self { ctx, processor }
    }

    /// Opens a shift for a teller on a register.
    ///
    /// The shift code is built from today's date on the engine clock.
    ///
    /// # Errors
    ///
    /// - `Validation` for a malformed register or teller code or an invalid
    ///   breakdown.
    /// - `ShiftAlreadyOpen` if the teller already holds an open shift.
    /// - `DuplicateShiftCode` if this register/teller pair already had a shift
    ///   today.
    pub async fn open_shift(
        &self,
        register_code: &str,
        teller_code: &str,
        initial_breakdown: Breakdown,
    ) -> EngineResult<Shift> {
        let validator = &self.ctx.validator;
        if !validator.validate_register_code(register_code) {
            return Err(EngineError::validation(
                "register_code",
                format!("Malformed register code: '{}'", register_code),
            ));
        }
        if !validator.validate_teller_code(teller_code) {
            return Err(EngineError::validation(
                "teller_code",
                format!("Malformed teller code: '{}'", teller_code),
            ));
        }
        if !validator.validate_breakdown(&initial_breakdown) {
            return Err(EngineError::validation(
                "initial_breakdown",
                "Breakdown must be non-empty, use recognized bill values and non-negative counts",
            ));
        }

        let _teller_guard = self.ctx.locks.lock(teller_key(teller_code)).await;

        if self.is_shift_open(teller_code).await? {
            warn!(teller_code = %teller_code, "Teller already has an open shift");
            return Err(EngineError::ShiftAlreadyOpen {
                teller_code: teller_code.to_string(),
            });
        }

        let code = shift_code(register_code, teller_code, self.ctx.clock.today());
        let _shift_guard = self.ctx.locks.lock(shift_key(&code)).await;

        let shift = Shift::open(
            code,
            register_code.to_string(),
            teller_code.to_string(),
            self.ctx.clock.now(),
            initial_breakdown.clone(),
        );
        let shift = self.ctx.shifts.insert(shift).await?;

        if let Err(e) = self
            .processor
            .record(
                &shift.shift_code,
                EntryKind::Opening,
                initial_breakdown,
                Some(shift.initial_amount),
            )
            .await
        {
            error!(shift_code = %shift.shift_code, error = %e, "Failed to record opening entry");
            return Err(e);
        }

        info!(
            shift_code = %shift.shift_code,
            register_code = %shift.register_code,
            teller_code = %shift.teller_code,
            initial_amount = %shift.initial_amount,
            "Shift opened"
        );
        Ok(shift)
    }

    /// Closes an open shift and reconciles its drawer.
    ///
    /// The CLOSING entry is recorded before the shift is mutated; if the final
    /// state cannot be persisted the shift stays open and the close may be
    /// retried.
    ///
    /// # Errors
    ///
    /// - `Validation` for a malformed shift code or invalid breakdown.
    /// - `ShiftNotFound` if no shift has this code.
    /// - `ShiftAlreadyClosed` if the shift is already closed.
    pub async fn close_shift(
        &self,
        shift_code: &str,
        final_breakdown: Breakdown,
    ) -> EngineResult<Shift> {
        if !self.ctx.validator.validate_shift_code(shift_code) {
            return Err(EngineError::validation(
                "shift_code",
                format!("Malformed shift code: '{}'", shift_code),
            ));
        }
        if !self.ctx.validator.validate_breakdown(&final_breakdown) {
            return Err(EngineError::validation(
                "final_breakdown",
                "Breakdown must be non-empty, use recognized bill values and non-negative counts",
            ));
        }

        let _guard = self.ctx.locks.lock(shift_key(shift_code)).await;

        let shift = self.find_shift(shift_code).await?;
        if !shift.is_open() {
            warn!(shift_code = %shift_code, "Close requested for closed shift");
            return Err(EngineError::ShiftAlreadyClosed {
                shift_code: shift_code.to_string(),
            });
        }

        let final_amount = self.ctx.validator.total(&final_breakdown);
        self.processor
            .record(
                shift_code,
                EntryKind::Closing,
                final_breakdown.clone(),
                Some(final_amount),
            )
            .await?;

        let theoretical = shift.initial_amount + self.processor.movement_for_shift(shift_code).await?;
        let discrepancy = final_amount - theoretical;
        let discrepancy_alert = discrepancy.abs() > self.ctx.alert_tolerance;

        let closed = shift.closed(Closing {
            closed_at: self.ctx.clock.now(),
            final_breakdown,
            final_amount,
            discrepancy,
            discrepancy_alert,
        });
        let closed = self.ctx.shifts.update(closed, ShiftState::Open).await?;

        if discrepancy_alert {
            warn!(
                shift_code = %closed.shift_code,
                theoretical = %theoretical,
                declared = %final_amount,
                discrepancy = %discrepancy,
                "Shift closed with discrepancy"
            );
        } else {
            info!(
                shift_code = %closed.shift_code,
                final_amount = %final_amount,
                "Shift closed"
            );
        }
        Ok(closed)
    }

    /// Returns the teller's open shift, if any.
    pub async fn find_open_shift(&self, teller_code: &str) -> EngineResult<Option<Shift>> {
        let open = self
            .ctx
            .shifts
            .find_by_teller_and_state(teller_code, ShiftState::Open)
            .await?;
        Ok(open.into_iter().next())
    }

    /// Returns true if the teller holds an open shift.
    pub async fn is_shift_open(&self, teller_code: &str) -> EngineResult<bool> {
        Ok(self.find_open_shift(teller_code).await?.is_some())
    }

    /// Returns the open shift for a register/teller pair.
    ///
    /// # Errors
    ///
    /// `NoActiveShift` if none matches.
    pub async fn find_active_shift(
        &self,
        register_code: &str,
        teller_code: &str,
    ) -> EngineResult<Shift> {
        let mut open = self
            .ctx
            .shifts
            .find_by_register_and_teller_and_state(register_code, teller_code, ShiftState::Open)
            .await?;

        if open.len() > 1 {
            warn!(
                register_code = %register_code,
                teller_code = %teller_code,
                count = open.len(),
                "Multiple open shifts for register and teller"
            );
        }

        if open.is_empty() {
            return Err(EngineError::NoActiveShift {
                register_code: register_code.to_string(),
                teller_code: teller_code.to_string(),
            });
        }
        Ok(open.swap_remove(0))
    }

    /// Returns the shift with this code.
    ///
    /// # Errors
    ///
    /// `ShiftNotFound` if absent.
    pub async fn find_shift(&self, shift_code: &str) -> EngineResult<Shift> {
        self.ctx
            .shifts
            .find_by_shift_code(shift_code)
            .await?
            .ok_or_else(|| EngineError::ShiftNotFound {
                shift_code: shift_code.to_string(),
            })
    }

    /// Returns a teller's shifts, open ones first.
    pub async fn shifts_for_teller(&self, teller_code: &str) -> EngineResult<Vec<Shift>> {
        let mut shifts = Vec::new();
        for state in ShiftState::ALL {
            shifts.extend(
                self.ctx
                    .shifts
                    .find_by_teller_and_state(teller_code, state)
                    .await?,
            );
        }
        Ok(shifts)
    }

    /// Returns a register's shifts, open ones first.
    pub async fn shifts_for_register(&self, register_code: &str) -> EngineResult<Vec<Shift>> {
        let mut shifts = Vec::new();
        for state in ShiftState::ALL {
            shifts.extend(
                self.ctx
                    .shifts
                    .find_by_register_and_state(register_code, state)
                    .await?,
            );
        }
        Ok(shifts)
    }
}
