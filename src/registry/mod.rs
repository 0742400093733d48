/*!
 * Process Registry Module
 * Identity-keyed ownership of accelerator entries and their lifecycle
 */

pub mod entry;
pub mod manager;
pub mod stat;
pub mod types;

// Re-export for convenience
pub use entry::{AcceleratorEntry, ProcessEntry};
pub use manager::ProcessRegistry;
pub use stat::StatSnapshot;
pub use types::*;
