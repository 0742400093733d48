/*!
 * Core Types
 * Common types used across the controller
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Process ID type
pub type Pid = u32;

/// Accelerator (device) ID type
pub type AccelId = u32;

/// Size type for memory charges, in bytes
pub type Size = u64;

/// Common result type for controller operations
pub type ControlResult<T> = Result<T, super::errors::ControlError>;

/// Composite identity keying all per-accelerator state
///
/// Every counter, policy value, and event count in the controller belongs to
/// exactly one (process, accelerator) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Identity {
    pub pid: Pid,
    pub accel: AccelId,
}

impl Identity {
    #[inline]
    #[must_use]
    pub const fn new(pid: Pid, accel: AccelId) -> Self {
        Self { pid, accel }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pid, self.accel)
    }
}
