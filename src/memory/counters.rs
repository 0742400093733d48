/*!
 * Memory Counters
 * Lock-free charge/uncharge state for one (process, accelerator) identity
 */

use super::types::{ChargeKind, MemoryError, MemoryLimit, MemoryResult, MemoryUsage};
use crate::core::types::Size;
use std::sync::atomic::{AtomicU64, Ordering};

/// Charge/uncharge counters for a single accelerator entry
///
/// Check-then-act on a counter is indivisible: the limit check and the
/// increment happen in one compare-exchange, so concurrent chargers can
/// never both slip past a limit only one of them fits under. A failed
/// charge leaves every counter untouched.
///
/// # Performance
/// - Cache-line aligned to prevent false sharing with neighboring entries
/// - Lock-free: charge paths on different identities never contend
#[repr(C, align(64))]
#[derive(Debug)]
pub struct MemoryCounters {
    limit: AtomicU64,
    current: AtomicU64,
    swap_current: AtomicU64,
    fail_count: AtomicU64,
    swap_fail_count: AtomicU64,
    underflow_count: AtomicU64,
}

impl MemoryCounters {
    /// Fresh counters: zero charged, unlimited ceiling
    #[must_use]
    pub fn new() -> Self {
        Self {
            limit: AtomicU64::new(MemoryLimit::UNLIMITED.as_raw()),
            current: AtomicU64::new(0),
            swap_current: AtomicU64::new(0),
            fail_count: AtomicU64::new(0),
            swap_fail_count: AtomicU64::new(0),
            underflow_count: AtomicU64::new(0),
        }
    }

    /// Atomically charge `size` bytes against the configured limit
    ///
    /// On rejection the relevant fail counter is bumped and charge state is
    /// unchanged.
    pub fn try_charge(&self, size: Size, kind: ChargeKind) -> MemoryResult<()> {
        let counter = self.counter(kind);
        // Each charge decides against the limit it observed; a concurrent
        // limit change applies to charges that start after its store
        let limit = self.limit.load(Ordering::Acquire);
        let mut current = counter.load(Ordering::Relaxed);

        loop {
            let next = match current.checked_add(size) {
                Some(next) if next <= limit => next,
                _ => {
                    self.fail_counter(kind).fetch_add(1, Ordering::Relaxed);
                    return Err(MemoryError::LimitExceeded {
                        requested: size,
                        limit,
                        current,
                    });
                }
            };

            match counter.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(()),
                Err(observed) => current = observed,
            }
        }
    }

    /// Atomically release `size` bytes from the selected counter
    ///
    /// Releasing more than is charged clamps the counter to zero, bumps the
    /// underflow counter, and surfaces the caller-contract violation as an
    /// error instead of wrapping.
    pub fn uncharge(&self, size: Size, kind: ChargeKind) -> MemoryResult<()> {
        let counter = self.counter(kind);
        let mut current = counter.load(Ordering::Relaxed);

        loop {
            if size > current {
                match counter.compare_exchange_weak(
                    current,
                    0,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                ) {
                    Ok(_) => {
                        self.underflow_count.fetch_add(1, Ordering::Relaxed);
                        return Err(MemoryError::Underflow {
                            requested: size,
                            charged: current,
                        });
                    }
                    Err(observed) => current = observed,
                }
            } else {
                match counter.compare_exchange_weak(
                    current,
                    current - size,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                ) {
                    Ok(_) => return Ok(()),
                    Err(observed) => current = observed,
                }
            }
        }
    }

    /// Replace the configured ceiling
    ///
    /// Lowering the limit below the current charge is accepted: existing
    /// charges stand, and further charges fail until usage drains below the
    /// new ceiling.
    #[inline]
    pub fn set_limit(&self, limit: MemoryLimit) {
        self.limit.store(limit.as_raw(), Ordering::Release);
    }

    #[inline]
    #[must_use]
    pub fn limit(&self) -> MemoryLimit {
        // Stored value is always normalized, so from_raw is a no-op rebuild
        MemoryLimit::from_raw(self.limit.load(Ordering::Acquire))
    }

    /// Bytes currently charged to primary device memory
    #[inline]
    #[must_use]
    pub fn current(&self) -> Size {
        self.current.load(Ordering::Acquire)
    }

    /// Bytes currently charged to the swap overflow counter
    #[inline]
    #[must_use]
    pub fn swap_current(&self) -> Size {
        self.swap_current.load(Ordering::Acquire)
    }

    /// Point-in-time copy of all counters
    ///
    /// Each field is individually coherent; the snapshot as a whole is not
    /// taken under a global lock.
    #[must_use]
    pub fn usage(&self) -> MemoryUsage {
        MemoryUsage {
            limit: self.limit(),
            current: self.current(),
            swap_current: self.swap_current(),
            fail_count: self.fail_count.load(Ordering::Relaxed),
            swap_fail_count: self.swap_fail_count.load(Ordering::Relaxed),
            underflow_count: self.underflow_count.load(Ordering::Relaxed),
        }
    }

    #[inline]
    fn counter(&self, kind: ChargeKind) -> &AtomicU64 {
        match kind {
            ChargeKind::Device => &self.current,
            ChargeKind::Swap => &self.swap_current,
        }
    }

    #[inline]
    fn fail_counter(&self, kind: ChargeKind) -> &AtomicU64 {
        match kind {
            ChargeKind::Device => &self.fail_count,
            ChargeKind::Swap => &self.swap_fail_count,
        }
    }
}

impl Default for MemoryCounters {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_respects_limit() {
        let counters = MemoryCounters::new();
        counters.set_limit(MemoryLimit::from_raw(1000));

        assert!(counters.try_charge(600, ChargeKind::Device).is_ok());
        assert_eq!(counters.current(), 600);

        let err = counters.try_charge(500, ChargeKind::Device).unwrap_err();
        assert_eq!(
            err,
            MemoryError::LimitExceeded {
                requested: 500,
                limit: 1000,
                current: 600,
            }
        );
        assert_eq!(counters.current(), 600, "rejected charge must not move the counter");

        assert!(counters.uncharge(600, ChargeKind::Device).is_ok());
        assert_eq!(counters.current(), 0);
    }

    #[test]
    fn test_uncharge_underflow_clamps_to_zero() {
        let counters = MemoryCounters::new();
        counters.set_limit(MemoryLimit::from_raw(1000));

        let err = counters.uncharge(100, ChargeKind::Device).unwrap_err();
        assert_eq!(
            err,
            MemoryError::Underflow {
                requested: 100,
                charged: 0,
            }
        );
        assert_eq!(counters.current(), 0);
        assert_eq!(counters.usage().underflow_count, 1);
    }

    #[test]
    fn test_partial_underflow_clamps_not_wraps() {
        let counters = MemoryCounters::new();
        assert!(counters.try_charge(50, ChargeKind::Device).is_ok());

        let err = counters.uncharge(80, ChargeKind::Device).unwrap_err();
        assert_eq!(
            err,
            MemoryError::Underflow {
                requested: 80,
                charged: 50,
            }
        );
        assert_eq!(counters.current(), 0, "clamped, never wrapped");
    }

    #[test]
    fn test_swap_counter_is_independent() {
        let counters = MemoryCounters::new();
        counters.set_limit(MemoryLimit::from_raw(100));

        assert!(counters.try_charge(100, ChargeKind::Device).is_ok());
        // Device counter is full; the swap counter still has headroom
        assert!(counters.try_charge(100, ChargeKind::Swap).is_ok());
        assert_eq!(counters.current(), 100);
        assert_eq!(counters.swap_current(), 100);

        assert!(counters.try_charge(1, ChargeKind::Swap).is_err());
        assert_eq!(counters.usage().swap_fail_count, 1);
        assert_eq!(counters.usage().fail_count, 0);
    }

    #[test]
    fn test_unlimited_by_default() {
        let counters = MemoryCounters::new();
        assert!(counters.limit().is_unlimited());
        assert!(counters.try_charge(u64::MAX / 2, ChargeKind::Device).is_ok());
    }

    #[test]
    fn test_lowering_limit_below_current_is_accepted() {
        let counters = MemoryCounters::new();
        counters.set_limit(MemoryLimit::from_raw(1000));
        assert!(counters.try_charge(800, ChargeKind::Device).is_ok());

        counters.set_limit(MemoryLimit::from_raw(500));
        assert_eq!(counters.current(), 800, "existing charges stand");
        assert!(counters.try_charge(1, ChargeKind::Device).is_err());

        assert!(counters.uncharge(400, ChargeKind::Device).is_ok());
        assert!(counters.try_charge(100, ChargeKind::Device).is_ok());
    }

    #[test]
    fn test_overflow_add_is_rejected() {
        let counters = MemoryCounters::new();
        assert!(counters.try_charge(u64::MAX - 10, ChargeKind::Device).is_ok());
        assert!(counters.try_charge(100, ChargeKind::Device).is_err());
        assert_eq!(counters.current(), u64::MAX - 10);
    }
}
