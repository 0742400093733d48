/*!
 * Memory Accounting Types
 * Common types for per-identity memory accounting
 */

use crate::core::types::Size;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Memory accounting result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory accounting errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("Memory limit exceeded: requested {requested} bytes, limit {limit} bytes, current {current} bytes")]
    #[diagnostic(
        code(memory::limit_exceeded),
        help("The charge was rejected and counters are unchanged. Raise memory.limit or uncharge first.")
    )]
    LimitExceeded {
        requested: u64,
        limit: u64,
        current: u64,
    },

    #[error("Uncharge underflow: requested {requested} bytes with only {charged} bytes charged")]
    #[diagnostic(
        code(memory::underflow),
        help("The caller released more than it charged. The counter was clamped to zero.")
    )]
    Underflow { requested: u64, charged: u64 },
}

/// Which counter a charge lands on
///
/// Primary device memory and the swap-style overflow counter are tracked
/// and limited independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeKind {
    /// Primary device memory
    Device,
    /// Overflow counter used when primary memory is exhausted but an
    /// overflow policy is in effect
    Swap,
}

impl ChargeKind {
    /// Map the wire-level `use_swap` flag onto a counter kind
    #[inline]
    #[must_use]
    pub const fn from_swap_flag(use_swap: bool) -> Self {
        if use_swap {
            ChargeKind::Swap
        } else {
            ChargeKind::Device
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_swap(&self) -> bool {
        matches!(self, ChargeKind::Swap)
    }
}

/// Configured memory ceiling for one identity
///
/// Stored as a raw byte count with `u64::MAX` as the unlimited sentinel.
/// Writing 0 is normalized to unlimited so both spellings behave the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryLimit(u64);

impl MemoryLimit {
    /// No ceiling: every well-formed charge succeeds
    pub const UNLIMITED: Self = Self(u64::MAX);

    /// Build a limit from a raw byte count, normalizing the 0 sentinel
    #[inline]
    #[must_use]
    pub const fn from_raw(bytes: u64) -> Self {
        if bytes == 0 {
            Self::UNLIMITED
        } else {
            Self(bytes)
        }
    }

    /// Raw byte ceiling (`u64::MAX` when unlimited)
    #[inline]
    #[must_use]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_unlimited(&self) -> bool {
        self.0 == u64::MAX
    }

    /// Parse the external text form: a byte count, or "max" / "0" for
    /// unlimited
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("max") {
            return Some(Self::UNLIMITED);
        }
        trimmed.parse::<u64>().ok().map(Self::from_raw)
    }
}

impl Default for MemoryLimit {
    fn default() -> Self {
        Self::UNLIMITED
    }
}

impl fmt::Display for MemoryLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unlimited() {
            write!(f, "max")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Point-in-time copy of one identity's memory accounting state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MemoryUsage {
    pub limit: MemoryLimit,
    pub current: Size,
    pub swap_current: Size,
    pub fail_count: u64,
    pub swap_fail_count: u64,
    pub underflow_count: u64,
}
