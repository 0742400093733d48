/*!
 * Scheduling Policy Module
 * Per-identity scheduling parameters consumed by the external dispatcher
 */

pub mod controller;
pub mod policy;
pub mod types;

// Re-export for convenience
pub use controller::PolicyController;
pub use policy::PolicyBlock;
pub use types::*;
