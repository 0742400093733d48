/*!
 * Core Module
 * Fundamental controller types, limits, and error handling
 */

pub mod errors;
pub mod limits;
pub mod shard;
pub mod types;

// Re-export for convenience
pub use errors::ControlError;
pub use shard::pid_index_shards;
pub use types::{AccelId, ControlResult, Identity, Pid, Size};
