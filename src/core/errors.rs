/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use thiserror::Error;

// Re-export RegistryError from registry module
pub use crate::registry::RegistryError;

// Re-export MemoryError from memory module
pub use crate::memory::MemoryError;

// Re-export PolicyError from sched module
pub use crate::sched::PolicyError;

// Re-export EventError from events module
pub use crate::events::EventError;

/// Unified controller error type with miette diagnostics
///
/// Every fallible operation in the crate funnels into this enum so callers
/// (and the status-code boundary) match on one type.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ControlError {
    #[error("Registry error: {0}")]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),

    #[error("Memory error: {0}")]
    #[diagnostic(transparent)]
    Memory(#[from] MemoryError),

    #[error("Policy error: {0}")]
    #[diagnostic(transparent)]
    Policy(#[from] PolicyError),

    #[error("Event error: {0}")]
    #[diagnostic(transparent)]
    Event(#[from] EventError),

    #[error("Node {node} is read-only")]
    #[diagnostic(
        code(control::read_only_node),
        help("Only memory.limit, compute.priority, and compute.freeze accept writes.")
    )]
    ReadOnlyNode { node: String },

    #[error("Invalid input {input:?} for node {node}")]
    #[diagnostic(
        code(control::invalid_input),
        help("Check the expected format for this attribute node.")
    )]
    InvalidInput { node: String, input: String },
}
