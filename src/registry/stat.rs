/*!
 * Stat Snapshot
 * Flat diagnostic view of one accelerator entry
 */

use crate::core::types::Identity;
use crate::events::{EventKind, EventSnapshot};
use crate::memory::MemoryUsage;
use crate::sched::PolicySnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Read-only diagnostic snapshot of one (process, accelerator) identity
///
/// Derived on every read from the live counters; never stored. The
/// `Display` form is the text served from the stat node: one
/// `<key> <value>` pair per line, booleans rendered as 0/1 and the
/// unlimited ceiling as `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StatSnapshot {
    pub identity: Identity,
    pub memory: MemoryUsage,
    pub policy: PolicySnapshot,
    pub events: EventSnapshot,
}

impl fmt::Display for StatSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "memory_current {}", self.memory.current)?;
        writeln!(f, "memory_swap_current {}", self.memory.swap_current)?;
        writeln!(f, "memory_limit {}", self.memory.limit)?;
        writeln!(f, "memory_fail_count {}", self.memory.fail_count)?;
        writeln!(f, "memory_swap_fail_count {}", self.memory.swap_fail_count)?;
        writeln!(f, "memory_underflow_count {}", self.memory.underflow_count)?;
        writeln!(f, "compute_priority {}", self.policy.priority)?;
        writeln!(f, "compute_frozen {}", u8::from(self.policy.frozen))?;
        writeln!(f, "compute_timeslice_us {}", self.policy.timeslice_us)?;
        writeln!(f, "compute_realtime {}", u8::from(self.policy.realtime))?;
        writeln!(f, "compute_interleave_level {}", self.policy.interleave_level)?;
        for kind in EventKind::ALL {
            writeln!(f, "event_{} {}", kind.as_str(), self.events.get(kind))?;
        }
        Ok(())
    }
}
