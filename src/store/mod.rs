//! Persistence contract consumed by the engine.
//!
//! The engine never touches storage directly; it goes through the
//! [`ShiftStore`] and [`LedgerStore`] traits. Both are async and must be safe
//! to share across tasks.
//!
//! The two writes that guard shift invariants are conditional and must be
//! atomic in every implementation:
//!
//! - [`ShiftStore::insert`] fails if the teller already has an open shift or
//!   the shift code is taken.
//! - [`ShiftStore::update`] fails unless the stored shift is still in the
//!   expected state.

mod in_memory;

use std::future::Future;

use thiserror::Error;

use crate::models::{EntryKind, LedgerEntry, Shift, ShiftState};

pub use in_memory::{InMemoryLedgerStore, InMemoryShiftStore};

/// Errors that can occur during store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An insert was rejected because the teller already has an open shift.
    #[error("Teller '{teller_code}' already has an open shift")]
    OpenShiftExists {
        /// The teller code.
        teller_code: String,
    },

    /// An insert was rejected because the shift code is already stored.
    #[error("Shift code already exists: {shift_code}")]
    DuplicateShiftCode {
        /// The shift code.
        shift_code: String,
    },

    /// An update targeted a shift that does not exist.
    #[error("Shift not found: {shift_code}")]
    ShiftNotFound {
        /// The shift code.
        shift_code: String,
    },

    /// A conditional update found the shift in an unexpected state.
    #[error("Shift '{shift_code}' is {found}, expected {expected}")]
    StateMismatch {
        /// The shift code.
        shift_code: String,
        /// The state the caller required.
        expected: ShiftState,
        /// The state actually stored.
        found: ShiftState,
    },

    /// The backing store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A type alias for Results that return StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage for shift records.
pub trait ShiftStore: Send + Sync {
    /// Inserts a new shift.
    ///
    /// Atomically rejects the insert with `OpenShiftExists` if the teller
    /// already has an open shift, or `DuplicateShiftCode` if the code is taken.
    fn insert(&self, shift: Shift) -> impl Future<Output = StoreResult<Shift>> + Send;

    /// Finds a shift by its code.
    fn find_by_shift_code(
        &self,
        shift_code: &str,
    ) -> impl Future<Output = StoreResult<Option<Shift>>> + Send;

    /// Finds a teller's shifts in the given state, oldest first.
    fn find_by_teller_and_state(
        &self,
        teller_code: &str,
        state: ShiftState,
    ) -> impl Future<Output = StoreResult<Vec<Shift>>> + Send;

    /// Finds a register's shifts in the given state, oldest first.
    fn find_by_register_and_state(
        &self,
        register_code: &str,
        state: ShiftState,
    ) -> impl Future<Output = StoreResult<Vec<Shift>>> + Send;

    /// Finds shifts for a register/teller pair in the given state, oldest first.
    fn find_by_register_and_teller_and_state(
        &self,
        register_code: &str,
        teller_code: &str,
        state: ShiftState,
    ) -> impl Future<Output = StoreResult<Vec<Shift>>> + Send;

    /// Returns true if a shift with this code exists in the given state.
    fn exists_by_shift_code_and_state(
        &self,
        shift_code: &str,
        state: ShiftState,
    ) -> impl Future<Output = StoreResult<bool>> + Send;

    /// Replaces a stored shift, provided its current state is `expected`.
    fn update(
        &self,
        shift: Shift,
        expected: ShiftState,
    ) -> impl Future<Output = StoreResult<Shift>> + Send;
}

/// Append-only storage for ledger entries.
pub trait LedgerStore: Send + Sync {
    /// Appends an entry.
    fn insert(&self, entry: LedgerEntry) -> impl Future<Output = StoreResult<LedgerEntry>> + Send;

    /// Returns a shift's entries, oldest first.
    fn find_by_shift_code(
        &self,
        shift_code: &str,
    ) -> impl Future<Output = StoreResult<Vec<LedgerEntry>>> + Send;

    /// Returns a teller's entries across all shifts, newest first.
    fn find_by_teller(
        &self,
        teller_code: &str,
    ) -> impl Future<Output = StoreResult<Vec<LedgerEntry>>> + Send;

    /// Returns a shift's entries of one kind, oldest first.
    fn find_by_shift_code_and_kind(
        &self,
        shift_code: &str,
        kind: EntryKind,
    ) -> impl Future<Output = StoreResult<Vec<LedgerEntry>>> + Send;

    /// Counts a shift's entries.
    fn count_by_shift_code(
        &self,
        shift_code: &str,
    ) -> impl Future<Output = StoreResult<usize>> + Send;
}
