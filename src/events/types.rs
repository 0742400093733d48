/*!
 * Event Types
 * Accelerator usage event kinds and snapshots
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Event recording errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum EventError {
    #[error("Unknown event kind {0}")]
    #[diagnostic(
        code(events::unknown_kind),
        help("The measurement path sent a kind this build does not know. Check for version skew.")
    )]
    UnknownKind(u32),
}

/// Accelerator usage events tracked per identity
///
/// Wire-compatible with the external measurement path: the discriminant is
/// the value carried in update-event-count requests.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Device page fault serviced for this identity
    PageFault = 0,
    /// Page migrated between host and device memory
    Migration = 1,
    /// Resident page evicted under memory pressure
    Eviction = 2,
    /// Dispatch throttled by policy
    Throttle = 3,
}

impl EventKind {
    /// Number of tracked kinds; sizes the per-entry counter array
    pub const COUNT: usize = 4;

    /// All kinds in discriminant order
    pub const ALL: [EventKind; Self::COUNT] = [
        EventKind::PageFault,
        EventKind::Migration,
        EventKind::Eviction,
        EventKind::Throttle,
    ];

    /// Stable textual name used in diagnostic output
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventKind::PageFault => "page_fault",
            EventKind::Migration => "migration",
            EventKind::Eviction => "eviction",
            EventKind::Throttle => "throttle",
        }
    }

    /// Index into the per-entry counter array
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

impl TryFrom<u32> for EventKind {
    type Error = EventError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(EventKind::PageFault),
            1 => Ok(EventKind::Migration),
            2 => Ok(EventKind::Eviction),
            3 => Ok(EventKind::Throttle),
            other => Err(EventError::UnknownKind(other)),
        }
    }
}

/// Point-in-time copy of one identity's event counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EventSnapshot {
    pub page_fault: u64,
    pub migration: u64,
    pub eviction: u64,
    pub throttle: u64,
}

impl EventSnapshot {
    /// Read one kind's count from the snapshot
    #[inline]
    #[must_use]
    pub const fn get(&self, kind: EventKind) -> u64 {
        match kind {
            EventKind::PageFault => self.page_fault,
            EventKind::Migration => self.migration,
            EventKind::Eviction => self.eviction,
            EventKind::Throttle => self.throttle,
        }
    }

    /// Sum across all kinds
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.page_fault + self.migration + self.eviction + self.throttle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_discriminant() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::try_from(kind as u32).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert_eq!(
            EventKind::try_from(42).unwrap_err(),
            EventError::UnknownKind(42)
        );
    }

    #[test]
    fn test_snapshot_get_matches_fields() {
        let snapshot = EventSnapshot {
            page_fault: 1,
            migration: 2,
            eviction: 3,
            throttle: 4,
        };
        assert_eq!(snapshot.get(EventKind::PageFault), 1);
        assert_eq!(snapshot.get(EventKind::Throttle), 4);
        assert_eq!(snapshot.total(), 10);
    }
}
