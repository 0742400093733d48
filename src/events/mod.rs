/*!
 * Event Counting Module
 * Per-identity, per-kind usage counters feeding diagnostics
 */

pub mod counter;
pub mod types;

// Re-export for convenience
pub use counter::{EventCounters, EventRecorder};
pub use types::*;
