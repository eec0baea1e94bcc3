//! Per-property mutual exclusion for booking mutations.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use roomify_shared::types::PropertyId;

/// Async locks keyed by property.
///
/// Every mutation that reads availability or status and then writes holds
/// the property's lock for the whole read-check-write sequence. Locks are
/// created on first use and dropped from the table once nobody holds or
/// waits on them.
#[derive(Debug, Default)]
pub struct PropertyLocks {
    inner: DashMap<PropertyId, Arc<Mutex<()>>>,
}

impl PropertyLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and takes the lock of one property.
    pub async fn acquire(&self, property_id: PropertyId) -> PropertyGuard<'_> {
        // Clone the Arc out so the shard guard is released before awaiting.
        let lock = self
            .inner
            .entry(property_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        PropertyGuard {
            locks: self,
            property_id,
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Evicts the entry if the table holds the only reference. Waiters clone
    /// the Arc under the shard lock, so a contended entry is never removed.
    fn release(&self, property_id: PropertyId) {
        self.inner
            .remove_if(&property_id, |_, lock| Arc::strong_count(lock) == 1);
    }

    /// Number of properties currently locked or awaited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True if no property is locked or awaited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Holds one property's lock; unlocks and tidies the table on drop.
#[derive(Debug)]
pub struct PropertyGuard<'a> {
    locks: &'a PropertyLocks,
    property_id: PropertyId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for PropertyGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks.release(self.property_id);
    }
}
