//! Per-key async mutual exclusion.
//!
//! Opens are serialized per teller and transactions/closes per shift code.
//! Lock order is always teller before shift.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// A set of named async mutexes created on demand.
#[derive(Debug, Clone, Default)]
pub(crate) struct KeyedLocks {
    inner: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl KeyedLocks {
    /// Waits for exclusive access to `key`. Released when the guard drops.
    pub(crate) async fn lock(&self, key: String) -> OwnedMutexGuard<()> {
        let mutex = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            // Entries referenced only by the map are idle.
            map.retain(|_, m| Arc::strong_count(m) > 1);
            Arc::clone(map.entry(key).or_default())
        };
        mutex.lock_owned().await
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

pub(crate) fn teller_key(teller_code: &str) -> String {
    format!("teller:{}", teller_code)
}

pub(crate) fn shift_key(shift_code: &str) -> String {
    format!("shift:{}", shift_code)
}
