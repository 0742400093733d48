/*!
 * Event Counters
 * Lock-free monotonic counters and the registry-backed recorder
 */

use super::types::{EventKind, EventSnapshot};
use crate::core::types::{ControlResult, Identity};
use crate::registry::ProcessRegistry;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-kind event counters for a single accelerator entry
///
/// Counters only grow for the life of the entry and disappear with it.
///
/// # Performance
/// - Cache-line aligned to prevent false sharing with the policy block
/// - Relaxed ordering: pure diagnostics, no cross-counter dependencies
#[repr(C, align(64))]
#[derive(Debug)]
pub struct EventCounters {
    counts: [AtomicU64; EventKind::COUNT],
}

impl EventCounters {
    #[must_use]
    pub fn new() -> Self {
        Self {
            counts: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    /// Add `delta` occurrences of `kind`
    #[inline]
    pub fn add(&self, kind: EventKind, delta: u64) {
        self.counts[kind.index()].fetch_add(delta, Ordering::Relaxed);
    }

    /// Record a single occurrence of `kind`
    #[inline]
    pub fn record(&self, kind: EventKind) {
        self.add(kind, 1);
    }

    /// Current count for one kind
    #[inline]
    #[must_use]
    pub fn count(&self, kind: EventKind) -> u64 {
        self.counts[kind.index()].load(Ordering::Relaxed)
    }

    /// Point-in-time copy of all counters
    #[must_use]
    pub fn snapshot(&self) -> EventSnapshot {
        EventSnapshot {
            page_fault: self.count(EventKind::PageFault),
            migration: self.count(EventKind::Migration),
            eviction: self.count(EventKind::Eviction),
            throttle: self.count(EventKind::Throttle),
        }
    }
}

impl Default for EventCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Event entry point used by the external measurement path
#[derive(Clone)]
pub struct EventRecorder {
    registry: ProcessRegistry,
}

impl EventRecorder {
    #[must_use]
    pub fn new(registry: ProcessRegistry) -> Self {
        Self { registry }
    }

    /// Record one occurrence of `kind` for the identity
    pub fn record(&self, identity: Identity, kind: EventKind) -> ControlResult<()> {
        self.add(identity, kind, 1)
    }

    /// Push a batch of `delta` occurrences of `kind` for the identity
    pub fn add(&self, identity: Identity, kind: EventKind, delta: u64) -> ControlResult<()> {
        let entry = self.registry.accelerator(identity)?;
        entry.events().add(kind, delta);
        debug!("Recorded {} x{} for {}", kind.as_str(), delta, identity);
        Ok(())
    }

    /// Point-in-time copy of the identity's counters
    pub fn snapshot(&self, identity: Identity) -> ControlResult<EventSnapshot> {
        Ok(self.registry.accelerator(identity)?.events().snapshot())
    }
}
