/*!
 * Memory Accounting Module
 * Per-identity charge/uncharge accounting against configurable limits
 */

pub mod accountant;
pub mod counters;
pub mod types;

// Re-export for convenience
pub use accountant::MemoryAccountant;
pub use counters::MemoryCounters;
pub use types::*;
