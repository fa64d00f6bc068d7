//! In-memory store implementations.
//!
//! Thread-safe with `Arc<RwLock<...>>`. Conditional writes check and mutate
//! under a single write lock, which makes them atomic with respect to every
//! other store operation.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{EntryKind, LedgerEntry, Shift, ShiftState};

use super::{LedgerStore, ShiftStore, StoreError, StoreResult};

/// In-memory implementation of [`ShiftStore`], keyed by shift code.
#[derive(Debug, Clone, Default)]
pub struct InMemoryShiftStore {
    shifts: Arc<RwLock<HashMap<String, Shift>>>,
}

impl InMemoryShiftStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn select<F>(&self, predicate: F) -> Vec<Shift>
    where
        F: Fn(&Shift) -> bool,
    {
        let guard = self.shifts.read().await;
        let mut shifts: Vec<Shift> = guard.values().filter(|s| predicate(s)).cloned().collect();
        shifts.sort_by(|a, b| {
            a.opened_at
                .cmp(&b.opened_at)
                .then_with(|| a.shift_code.cmp(&b.shift_code))
        });
        shifts
    }
}

impl ShiftStore for InMemoryShiftStore {
    async fn insert(&self, shift: Shift) -> StoreResult<Shift> {
        let mut guard = self.shifts.write().await;

        if guard.contains_key(&shift.shift_code) {
            return Err(StoreError::DuplicateShiftCode {
                shift_code: shift.shift_code,
            });
        }

        if shift.is_open()
            && guard
                .values()
                .any(|s| s.teller_code == shift.teller_code && s.is_open())
        {
            return Err(StoreError::OpenShiftExists {
                teller_code: shift.teller_code,
            });
        }

        guard.insert(shift.shift_code.clone(), shift.clone());
        Ok(shift)
    }

    async fn find_by_shift_code(&self, shift_code: &str) -> StoreResult<Option<Shift>> {
        let guard = self.shifts.read().await;
        Ok(guard.get(shift_code).cloned())
    }

    async fn find_by_teller_and_state(
        &self,
        teller_code: &str,
        state: ShiftState,
    ) -> StoreResult<Vec<Shift>> {
        Ok(self
            .select(|s| s.teller_code == teller_code && s.state == state)
            .await)
    }

    async fn find_by_register_and_state(
        &self,
        register_code: &str,
        state: ShiftState,
    ) -> StoreResult<Vec<Shift>> {
        Ok(self
            .select(|s| s.register_code == register_code && s.state == state)
            .await)
    }

    async fn find_by_register_and_teller_and_state(
        &self,
        register_code: &str,
        teller_code: &str,
        state: ShiftState,
    ) -> StoreResult<Vec<Shift>> {
        Ok(self
            .select(|s| {
                s.register_code == register_code && s.teller_code == teller_code && s.state == state
            })
            .await)
    }

    async fn exists_by_shift_code_and_state(
        &self,
        shift_code: &str,
        state: ShiftState,
    ) -> StoreResult<bool> {
        let guard = self.shifts.read().await;
        Ok(guard.get(shift_code).is_some_and(|s| s.state == state))
    }

    async fn update(&self, shift: Shift, expected: ShiftState) -> StoreResult<Shift> {
        let mut guard = self.shifts.write().await;

        let Some(existing) = guard.get_mut(&shift.shift_code) else {
            return Err(StoreError::ShiftNotFound {
                shift_code: shift.shift_code,
            });
        };

        if existing.state != expected {
            return Err(StoreError::StateMismatch {
                shift_code: shift.shift_code,
                expected,
                found: existing.state,
            });
        }

        *existing = shift.clone();
        Ok(shift)
    }
}

/// In-memory implementation of [`LedgerStore`].
///
/// Entries are kept in insertion order; queries sort stably by timestamp so
/// entries recorded at the same instant keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerStore {
    entries: Arc<RwLock<Vec<LedgerEntry>>>,
}

impl InMemoryLedgerStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    async fn insert(&self, entry: LedgerEntry) -> StoreResult<LedgerEntry> {
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn find_by_shift_code(&self, shift_code: &str) -> StoreResult<Vec<LedgerEntry>> {
        let guard = self.entries.read().await;
        let mut entries: Vec<LedgerEntry> = guard
            .iter()
            .filter(|e| e.shift_code == shift_code)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.recorded_at);
        Ok(entries)
    }

    async fn find_by_teller(&self, teller_code: &str) -> StoreResult<Vec<LedgerEntry>> {
        let guard = self.entries.read().await;
        // Reverse first so that ties stay newest-first after the stable sort.
        let mut entries: Vec<LedgerEntry> = guard
            .iter()
            .rev()
            .filter(|e| e.teller_code == teller_code)
            .cloned()
            .collect();
        entries.sort_by_key(|e| Reverse(e.recorded_at));
        Ok(entries)
    }

    async fn find_by_shift_code_and_kind(
        &self,
        shift_code: &str,
        kind: EntryKind,
    ) -> StoreResult<Vec<LedgerEntry>> {
        let mut entries = self.find_by_shift_code(shift_code).await?;
        entries.retain(|e| e.kind == kind);
        Ok(entries)
    }

    async fn count_by_shift_code(&self, shift_code: &str) -> StoreResult<usize> {
        let guard = self.entries.read().await;
        Ok(guard.iter().filter(|e| e.shift_code == shift_code).count())
    }
}
