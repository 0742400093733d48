/*!
 * Registry Entries
 * Per-process scope and the per-accelerator state it owns
 */

use super::stat::StatSnapshot;
use super::types::{RegistryError, RegistryResult};
use crate::core::types::{AccelId, Identity, Pid};
use crate::events::EventCounters;
use crate::memory::MemoryCounters;
use crate::sched::PolicyBlock;
use ahash::RandomState;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// All controller state for one (process, accelerator) identity
///
/// Bundles the memory counters, policy block, and event counters that the
/// accountant, controller, and recorder facades operate on. Counter updates
/// need no lock on this struct: each member is independently atomic.
///
/// # Performance
/// - Members are individually cache-line aligned, so hot charge traffic
///   never false-shares with policy reads or event counts
#[derive(Debug)]
pub struct AcceleratorEntry {
    identity: Identity,
    memory: MemoryCounters,
    policy: PolicyBlock,
    events: EventCounters,
}

impl AcceleratorEntry {
    #[must_use]
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            memory: MemoryCounters::new(),
            policy: PolicyBlock::new(),
            events: EventCounters::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn identity(&self) -> Identity {
        self.identity
    }

    #[inline]
    #[must_use]
    pub fn memory(&self) -> &MemoryCounters {
        &self.memory
    }

    #[inline]
    #[must_use]
    pub fn policy(&self) -> &PolicyBlock {
        &self.policy
    }

    #[inline]
    #[must_use]
    pub fn events(&self) -> &EventCounters {
        &self.events
    }

    /// Assemble the diagnostic snapshot, recomputed on every read
    #[must_use]
    pub fn stat(&self) -> StatSnapshot {
        StatSnapshot {
            identity: self.identity,
            memory: self.memory.usage(),
            policy: self.policy.snapshot(),
            events: self.events.snapshot(),
        }
    }
}

/// One process's scope: a bounded set of accelerator slots
///
/// Slot mutation happens under this entry's own lock, scoped to the one
/// process; counter traffic on resident entries bypasses it entirely.
#[derive(Debug)]
pub struct ProcessEntry {
    pid: Pid,
    max_slots: usize,
    slots: RwLock<HashMap<AccelId, Arc<AcceleratorEntry>, RandomState>>,
}

impl ProcessEntry {
    #[must_use]
    pub fn new(pid: Pid, max_slots: usize) -> Self {
        Self {
            pid,
            max_slots,
            slots: RwLock::new(HashMap::with_capacity_and_hasher(
                max_slots,
                RandomState::new(),
            )),
        }
    }

    #[inline]
    #[must_use]
    pub const fn pid(&self) -> Pid {
        self.pid
    }

    /// Number of currently populated slots
    #[must_use]
    pub fn accelerator_count(&self) -> usize {
        self.slots.read().len()
    }

    /// Populated accelerator ids in ascending order
    #[must_use]
    pub fn accelerator_ids(&self) -> Vec<AccelId> {
        let mut ids: Vec<AccelId> = self.slots.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Resolve one slot
    #[must_use]
    pub fn get(&self, accel: AccelId) -> Option<Arc<AcceleratorEntry>> {
        self.slots.read().get(&accel).map(Arc::clone)
    }

    /// Populate a slot with fresh counters
    ///
    /// The duplicate check and the capacity check happen under the same
    /// write lock as the insert, so two racing creators cannot both
    /// succeed or blow past `max_slots`.
    pub fn insert(&self, accel: AccelId) -> RegistryResult<()> {
        let mut slots = self.slots.write();

        if slots.contains_key(&accel) {
            return Err(RegistryError::AcceleratorExists {
                pid: self.pid,
                accel,
            });
        }
        if slots.len() >= self.max_slots {
            return Err(RegistryError::TooManyAccelerators {
                pid: self.pid,
                limit: self.max_slots,
            });
        }

        let entry = Arc::new(AcceleratorEntry::new(Identity::new(self.pid, accel)));
        slots.insert(accel, entry);
        Ok(())
    }

    /// Unlink a slot, returning it for teardown inspection
    pub fn remove(&self, accel: AccelId) -> RegistryResult<Arc<AcceleratorEntry>> {
        self.slots
            .write()
            .remove(&accel)
            .ok_or(RegistryError::AcceleratorNotFound {
                pid: self.pid,
                accel,
            })
    }

    /// Unlink every slot at once, as one critical section
    pub fn drain(&self) -> Vec<Arc<AcceleratorEntry>> {
        self.slots.write().drain().map(|(_, entry)| entry).collect()
    }
}
