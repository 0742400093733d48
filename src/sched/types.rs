/*!
 * Scheduling Policy Types
 * Domain types for the per-identity policy store
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Policy operation result
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Policy validation errors with serialization support
///
/// A rejected write leaves the previously stored value untouched.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum PolicyError {
    #[error("Priority {value} out of range [{min}, {max}]")]
    #[diagnostic(
        code(policy::invalid_priority),
        help("Compute priority is an ordinal weight; pick a value inside the advertised range.")
    )]
    InvalidPriority { value: u32, min: u32, max: u32 },

    #[error("Timeslice {value_us}us out of range [{min_us}us, {max_us}us]")]
    #[diagnostic(
        code(policy::invalid_timeslice),
        help("Quanta shorter than the minimum thrash the dispatcher; longer than the maximum starve other identities.")
    )]
    InvalidTimeslice {
        value_us: u64,
        min_us: u64,
        max_us: u64,
    },

    #[error("Interleave level {value} out of range [{min}, {max}]")]
    #[diagnostic(
        code(policy::invalid_interleave),
        help("Interleave level must be a positive subdivision count supported by the dispatch hardware.")
    )]
    InvalidInterleave { value: u32, min: u32, max: u32 },
}

/// Point-in-time copy of one identity's scheduling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PolicySnapshot {
    pub priority: u32,
    pub frozen: bool,
    pub timeslice_us: u64,
    pub realtime: bool,
    pub interleave_level: u32,
}
