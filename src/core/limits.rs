/*!
 * Controller Limits and Constants
 *
 * Centralized location for capacity bounds and policy value ranges.
 * Organized by domain for maintainability and discoverability.
 *
 * ## Design Philosophy
 * - All values include rationale comments explaining WHY they exist
 * - Values are grouped by domain (registry, scheduling)
 * - Runtime-configurable values here are defaults, overridable via
 *   `RegistryConfig`; validation ranges are fixed
 */

use std::time::Duration;

// =============================================================================
// REGISTRY CAPACITY
// =============================================================================

/// Maximum accelerator slots per process scope
/// A single node rarely exposes more than a few dozen devices; the bounded
/// slot collection replaces an implicit fixed-array overflow with an explicit
/// capacity check
pub const MAX_ACCELERATORS: usize = 32;

/// Default maximum process scopes in one registry
/// Guards the pid index against unbounded growth when the external lifecycle
/// collaborator leaks scopes
pub const DEFAULT_MAX_PROCESS_SCOPES: usize = 4096;

// =============================================================================
// SCHEDULING POLICY RANGES
// =============================================================================

/// Lowest accepted compute priority (least scheduling weight)
pub const COMPUTE_PRIORITY_MIN: u32 = 0;

/// Highest accepted compute priority
pub const COMPUTE_PRIORITY_MAX: u32 = 100;

/// Default compute priority for a fresh accelerator entry
/// Mid-range so both boosts and demotions are possible without reconfiguring
pub const DEFAULT_COMPUTE_PRIORITY: u32 = 50;

/// Shortest accepted time-slice quantum
/// Below this the context-switch overhead on the accelerator dominates useful
/// work
pub const TIMESLICE_MIN: Duration = Duration::from_micros(100);

/// Longest accepted time-slice quantum
/// Above one second a runaway identity can starve every other tenant of the
/// device for human-noticeable stretches
pub const TIMESLICE_MAX: Duration = Duration::from_secs(1);

/// Default time-slice quantum for a fresh accelerator entry (2ms)
pub const DEFAULT_TIMESLICE: Duration = Duration::from_micros(2_000);

/// Finest accepted interleave level
/// Level 1 means work for this identity runs in whole-quantum chunks
pub const INTERLEAVE_MIN: u32 = 1;

/// Coarsest accepted interleave level
/// 8 subdivisions is the deepest split the dispatch hardware honors
pub const INTERLEAVE_MAX: u32 = 8;

/// Default interleave level for a fresh accelerator entry
pub const DEFAULT_INTERLEAVE_LEVEL: u32 = 1;
