//! Memoized table snapshots.
//!
//! Loading a source is the only expensive step in browsing an archive, so
//! snapshots are cached per [`TableKey`]. Each key owns a slot guarded by
//! its own lock: the first caller loads while later callers for the same
//! key wait on the slot and then share the result. Callers for other keys
//! are not blocked.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::Result;
use crate::table::{Table, TableKey, TableLoader};

type Slot = Arc<Mutex<Option<Arc<Table>>>>;

/// Read-through, single-flight snapshot cache.
#[derive(Debug)]
pub struct TableCache<L> {
    loader: L,
    slots: Mutex<HashMap<TableKey, Slot>>,
}

impl<L: TableLoader> TableCache<L> {
    /// Create an empty cache backed by `loader`.
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Snapshot for `key`, loading it on first use.
    ///
    /// A failed load is not cached; the next call retries.
    ///
    /// # Errors
    ///
    /// Propagates the loader's error.
    pub fn get(&self, key: &TableKey) -> Result<Arc<Table>> {
        let slot = self.slot(key);
        let mut guard = lock(&slot);
        if let Some(table) = guard.as_ref() {
            debug!(source = %key.source.display(), sheet = ?key.sheet, "table cache hit");
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(self.loader.load(key)?);
        *guard = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Load `key` afresh and replace any cached snapshot.
    ///
    /// Snapshots already handed out stay valid; they are simply no longer
    /// returned by [`get`](Self::get). On failure the old snapshot is kept.
    ///
    /// # Errors
    ///
    /// Propagates the loader's error.
    pub fn reload(&self, key: &TableKey) -> Result<Arc<Table>> {
        let slot = self.slot(key);
        let mut guard = lock(&slot);
        let table = Arc::new(self.loader.load(key)?);
        *guard = Some(Arc::clone(&table));
        debug!(source = %key.source.display(), sheet = ?key.sheet, "table reloaded");
        Ok(table)
    }

    /// Drop the snapshot for `key`. Returns whether one was cached.
    pub fn invalidate(&self, key: &TableKey) -> bool {
        let removed = lock(&self.slots).remove(key);
        removed.is_some_and(|slot| is_loaded(&slot))
    }

    /// Drop every snapshot.
    pub fn clear(&self) {
        lock(&self.slots).clear();
    }

    /// Whether a loaded snapshot is cached for `key`.
    pub fn contains(&self, key: &TableKey) -> bool {
        let slot = lock(&self.slots).get(key).cloned();
        slot.is_some_and(|slot| is_loaded(&slot))
    }

    /// Number of loaded snapshots.
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = lock(&self.slots).values().cloned().collect();
        slots.iter().filter(|slot| is_loaded(slot)).count()
    }

    /// Whether no snapshot is loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The loader backing this cache.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    fn slot(&self, key: &TableKey) -> Slot {
        Arc::clone(lock(&self.slots).entry(key.clone()).or_default())
    }
}

fn is_loaded(slot: &Slot) -> bool {
    let guard = lock(slot);
    guard.is_some()
}

/// Cached values are written once and never left half-built, so a panic
/// in another holder does not invalidate them.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
