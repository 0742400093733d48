/*!
 * Policy Block
 * Atomic scheduling-parameter storage for one (process, accelerator) identity
 */

use super::types::{PolicyError, PolicyResult, PolicySnapshot};
use crate::core::limits::{
    COMPUTE_PRIORITY_MAX, COMPUTE_PRIORITY_MIN, DEFAULT_COMPUTE_PRIORITY,
    DEFAULT_INTERLEAVE_LEVEL, DEFAULT_TIMESLICE, INTERLEAVE_MAX, INTERLEAVE_MIN, TIMESLICE_MAX,
    TIMESLICE_MIN,
};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

/// Scheduling parameters for a single accelerator entry
///
/// Writers validate before storing, so a rejected write never disturbs the
/// stored value. All fields use sequentially consistent atomics: once a set
/// completes, every subsequent read anywhere observes it.
///
/// # Performance
/// - Cache-line aligned to prevent false sharing with the memory counters
#[repr(C, align(64))]
#[derive(Debug)]
pub struct PolicyBlock {
    priority: AtomicU32,
    interleave_level: AtomicU32,
    timeslice_us: AtomicU64,
    frozen: AtomicBool,
    realtime: AtomicBool,
}

impl PolicyBlock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            priority: AtomicU32::new(DEFAULT_COMPUTE_PRIORITY),
            interleave_level: AtomicU32::new(DEFAULT_INTERLEAVE_LEVEL),
            timeslice_us: AtomicU64::new(DEFAULT_TIMESLICE.as_micros() as u64),
            frozen: AtomicBool::new(false),
            realtime: AtomicBool::new(false),
        }
    }

    /// Set the ordinal scheduling weight
    pub fn set_priority(&self, priority: u32) -> PolicyResult<()> {
        if !(COMPUTE_PRIORITY_MIN..=COMPUTE_PRIORITY_MAX).contains(&priority) {
            return Err(PolicyError::InvalidPriority {
                value: priority,
                min: COMPUTE_PRIORITY_MIN,
                max: COMPUTE_PRIORITY_MAX,
            });
        }
        self.priority.store(priority, Ordering::SeqCst);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn priority(&self) -> u32 {
        self.priority.load(Ordering::SeqCst)
    }

    /// Record the freeze flag
    ///
    /// Pure state: setting it does not stop in-flight work. The external
    /// dispatcher consults the flag before each future dispatch decision.
    #[inline]
    pub fn set_frozen(&self, frozen: bool) {
        self.frozen.store(frozen, Ordering::SeqCst);
    }

    #[inline]
    #[must_use]
    pub fn frozen(&self) -> bool {
        self.frozen.load(Ordering::SeqCst)
    }

    /// Request or clear the realtime scheduling class
    #[inline]
    pub fn set_realtime(&self, realtime: bool) {
        self.realtime.store(realtime, Ordering::SeqCst);
    }

    #[inline]
    #[must_use]
    pub fn realtime(&self) -> bool {
        self.realtime.load(Ordering::SeqCst)
    }

    /// Set the time-slice quantum
    pub fn set_timeslice(&self, quantum: Duration) -> PolicyResult<()> {
        if quantum < TIMESLICE_MIN || quantum > TIMESLICE_MAX {
            return Err(PolicyError::InvalidTimeslice {
                value_us: u64::try_from(quantum.as_micros()).unwrap_or(u64::MAX),
                min_us: TIMESLICE_MIN.as_micros() as u64,
                max_us: TIMESLICE_MAX.as_micros() as u64,
            });
        }
        // Validated range fits comfortably in u64 microseconds
        self.timeslice_us
            .store(quantum.as_micros() as u64, Ordering::SeqCst);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn timeslice(&self) -> Duration {
        Duration::from_micros(self.timeslice_us.load(Ordering::SeqCst))
    }

    /// Set how finely this identity's work interleaves with others
    pub fn set_interleave_level(&self, level: u32) -> PolicyResult<()> {
        if !(INTERLEAVE_MIN..=INTERLEAVE_MAX).contains(&level) {
            return Err(PolicyError::InvalidInterleave {
                value: level,
                min: INTERLEAVE_MIN,
                max: INTERLEAVE_MAX,
            });
        }
        self.interleave_level.store(level, Ordering::SeqCst);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn interleave_level(&self) -> u32 {
        self.interleave_level.load(Ordering::SeqCst)
    }

    /// Point-in-time copy of all parameters
    #[must_use]
    pub fn snapshot(&self) -> PolicySnapshot {
        PolicySnapshot {
            priority: self.priority(),
            frozen: self.frozen(),
            timeslice_us: self.timeslice_us.load(Ordering::SeqCst),
            realtime: self.realtime(),
            interleave_level: self.interleave_level(),
        }
    }
}

impl Default for PolicyBlock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = PolicyBlock::new();
        assert_eq!(policy.priority(), DEFAULT_COMPUTE_PRIORITY);
        assert_eq!(policy.timeslice(), DEFAULT_TIMESLICE);
        assert_eq!(policy.interleave_level(), DEFAULT_INTERLEAVE_LEVEL);
        assert!(!policy.frozen());
        assert!(!policy.realtime());
    }

    #[test]
    fn test_priority_bounds() {
        let policy = PolicyBlock::new();
        assert!(policy.set_priority(COMPUTE_PRIORITY_MIN).is_ok());
        assert!(policy.set_priority(COMPUTE_PRIORITY_MAX).is_ok());

        let err = policy.set_priority(COMPUTE_PRIORITY_MAX + 1).unwrap_err();
        assert_eq!(
            err,
            PolicyError::InvalidPriority {
                value: COMPUTE_PRIORITY_MAX + 1,
                min: COMPUTE_PRIORITY_MIN,
                max: COMPUTE_PRIORITY_MAX,
            }
        );
        assert_eq!(
            policy.priority(),
            COMPUTE_PRIORITY_MAX,
            "rejected write must leave prior value"
        );
    }

    #[test]
    fn test_timeslice_bounds() {
        let policy = PolicyBlock::new();
        assert!(policy.set_timeslice(Duration::from_micros(99)).is_err());
        assert!(policy.set_timeslice(TIMESLICE_MIN).is_ok());
        assert!(policy.set_timeslice(TIMESLICE_MAX).is_ok());
        assert!(policy.set_timeslice(Duration::from_secs(2)).is_err());
        assert_eq!(policy.timeslice(), TIMESLICE_MAX);
    }

    #[test]
    fn test_interleave_bounds() {
        let policy = PolicyBlock::new();
        assert!(policy.set_interleave_level(0).is_err());
        assert!(policy.set_interleave_level(INTERLEAVE_MIN).is_ok());
        assert!(policy.set_interleave_level(INTERLEAVE_MAX).is_ok());
        assert!(policy.set_interleave_level(INTERLEAVE_MAX + 1).is_err());
        assert_eq!(policy.interleave_level(), INTERLEAVE_MAX);
    }

    #[test]
    fn test_freeze_toggle() {
        let policy = PolicyBlock::new();
        policy.set_frozen(true);
        assert!(policy.frozen());
        policy.set_frozen(false);
        assert!(!policy.frozen());
    }

    #[test]
    fn test_snapshot_reflects_writes() {
        let policy = PolicyBlock::new();
        policy.set_priority(90).unwrap();
        policy.set_frozen(true);
        policy.set_realtime(true);
        policy.set_timeslice(Duration::from_micros(500)).unwrap();
        policy.set_interleave_level(4).unwrap();

        let snapshot = policy.snapshot();
        assert_eq!(
            snapshot,
            PolicySnapshot {
                priority: 90,
                frozen: true,
                timeslice_us: 500,
                realtime: true,
                interleave_level: 4,
            }
        );
    }
}
