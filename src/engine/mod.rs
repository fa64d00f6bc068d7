//! Shift lifecycle and reconciliation engine.
//!
//! [`ShiftEngine`] wires the components together over a shift store, a ledger
//! store, a validator and a clock:
//!
//! - [`TransactionProcessor`] validates and records ledger entries.
//! - [`ShiftLifecycle`] opens and closes shifts and answers shift lookups.
//! - [`ShiftReports`] builds reconciliation summaries and teller status.
//!
//! All components share one context, so a lock taken by one is honored by
//! the others.
//!
//! # Example
//!
//! ```
//! use teller_shift_engine::config::ConfigLoader;
//! use teller_shift_engine::engine::InMemoryEngine;
//! use teller_shift_engine::models::Breakdown;
//! use rust_decimal::Decimal;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let engine = InMemoryEngine::in_memory(&ConfigLoader::default()).unwrap();
//! let opening: Breakdown = [(100, 10)].into_iter().collect();
//! let shift = engine.lifecycle().open_shift("CAJ01", "USU01", opening).await.unwrap();
//!
//! let deposit: Breakdown = [(100, 3), (50, 4)].into_iter().collect();
//! engine.processor().process(&shift.shift_code, "DEPOSIT", deposit, None).await.unwrap();
//!
//! let summary = engine.reports().summarize(&shift.shift_code).await.unwrap();
//! assert_eq!(summary.theoretical_amount, Decimal::from(1500));
//! # }
//! ```

mod clock;
mod lifecycle;
mod locks;
mod processor;
mod summary;

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::store::{InMemoryLedgerStore, InMemoryShiftStore, LedgerStore, ShiftStore};
use crate::validation::Validator;

pub use clock::{Clock, FixedClock, SystemClock};
pub use lifecycle::ShiftLifecycle;
pub use processor::TransactionProcessor;
pub use summary::ShiftReports;

use locks::KeyedLocks;

/// State shared by every engine component.
pub(crate) struct EngineContext<S, L> {
    pub(crate) shifts: S,
    pub(crate) ledger: L,
    pub(crate) validator: Validator,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) locks: KeyedLocks,
    pub(crate) alert_tolerance: Decimal,
}

/// The engine over a pair of stores.
pub struct ShiftEngine<S, L> {
    validator: Validator,
    processor: TransactionProcessor<S, L>,
    lifecycle: ShiftLifecycle<S, L>,
    reports: ShiftReports<S, L>,
}

/// An engine backed by the in-memory stores.
pub type InMemoryEngine = ShiftEngine<InMemoryShiftStore, InMemoryLedgerStore>;

impl<S: ShiftStore, L: LedgerStore> ShiftEngine<S, L> {
    /// Builds an engine from configuration, stores and a clock.
    ///
    /// # Errors
    ///
    /// `ConfigParseError` if an identifier pattern does not compile.
    pub fn new(
        config: &ConfigLoader,
        shifts: S,
        ledger: L,
        clock: Arc<dyn Clock>,
    ) -> EngineResult<Self> {
        let validator = Validator::new(config.validation())?;
        let ctx = Arc::new(EngineContext {
            shifts,
            ledger,
            validator: validator.clone(),
            clock,
            locks: KeyedLocks::default(),
            alert_tolerance: config.reconciliation().alert_tolerance,
        });

        let processor = TransactionProcessor::new(Arc::clone(&ctx));
        let lifecycle = ShiftLifecycle::new(Arc::clone(&ctx), processor.clone());
        let reports = ShiftReports::new(ctx, lifecycle.clone());

        Ok(Self {
            validator,
            processor,
            lifecycle,
            reports,
        })
    }

    /// Returns the transaction processor.
    pub fn processor(&self) -> &TransactionProcessor<S, L> {
        &self.processor
    }

    /// Returns the shift lifecycle manager.
    pub fn lifecycle(&self) -> &ShiftLifecycle<S, L> {
        &self.lifecycle
    }

    /// Returns the read-side reports.
    pub fn reports(&self) -> &ShiftReports<S, L> {
        &self.reports
    }

    /// Returns the validator the engine was built with.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }
}

impl InMemoryEngine {
    /// Builds an engine over fresh in-memory stores and the system clock.
    pub fn in_memory(config: &ConfigLoader) -> EngineResult<Self> {
        Self::new(
            config,
            InMemoryShiftStore::new(),
            InMemoryLedgerStore::new(),
            Arc::new(SystemClock),
        )
    }
}
