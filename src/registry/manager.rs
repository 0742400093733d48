/*!
 * Process Registry
 * Concurrent pid-keyed index over process scopes and their accelerator slots
 */

use super::entry::{AcceleratorEntry, ProcessEntry};
use super::types::{RegistryConfig, RegistryError, RegistryResult};
use super::stat::StatSnapshot;
use crate::core::limits::MAX_ACCELERATORS;
use crate::core::shard::pid_index_shards;
use crate::core::types::{Identity, Pid};
use ahash::RandomState;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Owner of all process scopes
///
/// Lookup is O(1) expected through a sharded map, so structural operations
/// on different pids proceed in parallel and readers never block writers of
/// unrelated scopes. A scope becomes visible only once fully constructed:
/// the map's entry ownership means no reader can observe a half-built one.
///
/// Cloning is cheap and every clone operates on the same underlying state,
/// which is how the accountant, controller, and recorder facades share it.
#[derive(Clone)]
pub struct ProcessRegistry {
    processes: Arc<DashMap<Pid, Arc<ProcessEntry>, RandomState>>,
    // Registry-wide scope count, maintained separately so the capacity
    // check never touches the map's shard locks
    scope_count: Arc<AtomicUsize>,
    config: RegistryConfig,
}

impl ProcessRegistry {
    /// Registry with platform-default bounds
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Registry with explicit bounds
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        let mut config = config;
        if config.max_accelerators > MAX_ACCELERATORS {
            warn!(
                "max_accelerators {} exceeds platform bound {}, clamping",
                config.max_accelerators, MAX_ACCELERATORS
            );
            config.max_accelerators = MAX_ACCELERATORS;
        }

        info!(
            "Process registry initialized (max processes: {}, slots per process: {})",
            config.max_processes, config.max_accelerators
        );

        Self {
            processes: Arc::new(DashMap::with_capacity_and_hasher_and_shard_amount(
                0,
                RandomState::new(),
                pid_index_shards(),
            )),
            scope_count: Arc::new(AtomicUsize::new(0)),
            config,
        }
    }

    /// Insert an empty process scope
    ///
    /// Returns `ProcessExists` for a pid that is already registered; the
    /// existing scope is left untouched.
    pub fn create_process(&self, pid: Pid) -> RegistryResult<()> {
        // Reserve a slot in the registry-wide count first; reverted if the
        // pid turns out to be a duplicate
        self.scope_count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                (count < self.config.max_processes).then_some(count + 1)
            })
            .map_err(|_| RegistryError::TooManyProcesses {
                limit: self.config.max_processes,
            })?;

        match self.processes.entry(pid) {
            Entry::Occupied(_) => {
                self.scope_count.fetch_sub(1, Ordering::SeqCst);
                Err(RegistryError::ProcessExists(pid))
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(ProcessEntry::new(
                    pid,
                    self.config.max_accelerators,
                )));
                info!("Created process scope {}", pid);
                Ok(())
            }
        }
    }

    /// Remove a process scope and every accelerator slot it holds
    ///
    /// The scope is unlinked from the index in one step, so concurrent
    /// lookups see either the intact scope or nothing; its slots are then
    /// drained as a unit.
    pub fn remove_process(&self, pid: Pid) -> RegistryResult<()> {
        let (_, entry) = self
            .processes
            .remove(&pid)
            .ok_or(RegistryError::ProcessNotFound(pid))?;
        self.scope_count.fetch_sub(1, Ordering::SeqCst);

        let slots = entry.drain();
        for slot in &slots {
            let usage = slot.memory().usage();
            if usage.current > 0 || usage.swap_current > 0 {
                warn!(
                    "Removing {} with {} bytes still charged ({} swap)",
                    slot.identity(),
                    usage.current,
                    usage.swap_current
                );
            }
        }

        info!(
            "Removed process scope {} ({} accelerator slots released)",
            pid,
            slots.len()
        );
        Ok(())
    }

    /// Resolve a process scope
    ///
    /// The returned handle stays valid if the scope is concurrently
    /// removed; later lookups for the same pid then fail.
    #[must_use]
    pub fn lookup(&self, pid: Pid) -> Option<Arc<ProcessEntry>> {
        self.processes.get(&pid).map(|r| Arc::clone(r.value()))
    }

    /// Populate an accelerator slot under an existing process scope
    pub fn create_accelerator(&self, identity: Identity) -> RegistryResult<()> {
        let process = self
            .processes
            .get(&identity.pid)
            .ok_or(RegistryError::ProcessNotFound(identity.pid))?;

        process.value().insert(identity.accel)?;
        info!("Created accelerator scope {}", identity);
        Ok(())
    }

    /// Remove one accelerator slot, releasing its counters with it
    pub fn remove_accelerator(&self, identity: Identity) -> RegistryResult<()> {
        let process = self
            .processes
            .get(&identity.pid)
            .ok_or(RegistryError::ProcessNotFound(identity.pid))?;
        let removed = process.value().remove(identity.accel)?;
        drop(process);

        let usage = removed.memory().usage();
        if usage.current > 0 || usage.swap_current > 0 {
            warn!(
                "Removing {} with {} bytes still charged ({} swap)",
                identity, usage.current, usage.swap_current
            );
        }

        info!("Removed accelerator scope {}", identity);
        Ok(())
    }

    /// Resolve one accelerator entry by identity
    pub fn accelerator(&self, identity: Identity) -> RegistryResult<Arc<AcceleratorEntry>> {
        let process = self
            .processes
            .get(&identity.pid)
            .ok_or(RegistryError::ProcessNotFound(identity.pid))?;
        let entry =
            process
                .value()
                .get(identity.accel)
                .ok_or(RegistryError::AcceleratorNotFound {
                    pid: identity.pid,
                    accel: identity.accel,
                })?;

        // A slot keyed under the wrong scope is a broken internal
        // invariant, not a recoverable condition
        debug_assert_eq!(entry.identity(), identity);
        Ok(entry)
    }

    /// Diagnostic snapshot for one identity
    pub fn stat(&self, identity: Identity) -> RegistryResult<StatSnapshot> {
        Ok(self.accelerator(identity)?.stat())
    }

    /// Number of registered process scopes
    #[must_use]
    pub fn process_count(&self) -> usize {
        self.scope_count.load(Ordering::SeqCst)
    }

    /// Registered pids in ascending order
    #[must_use]
    pub fn pids(&self) -> Vec<Pid> {
        let mut pids: Vec<Pid> = self.processes.iter().map(|r| *r.key()).collect();
        pids.sort_unstable();
        pids
    }

    /// Drain every scope; part of controller teardown
    pub fn clear(&self) {
        let pids: Vec<Pid> = self.processes.iter().map(|r| *r.key()).collect();
        let mut removed = 0usize;

        for pid in pids {
            if let Some((_, entry)) = self.processes.remove(&pid) {
                self.scope_count.fetch_sub(1, Ordering::SeqCst);
                let slots = entry.drain();
                debug!("Drained process scope {} ({} slots)", pid, slots.len());
                removed += 1;
            }
        }

        info!("Registry cleared ({} process scopes removed)", removed);
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}
