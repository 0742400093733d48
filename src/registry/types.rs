/*!
 * Registry Types
 * Errors and configuration for the process registry
 */

use crate::core::limits::{DEFAULT_MAX_PROCESS_SCOPES, MAX_ACCELERATORS};
use crate::core::types::{AccelId, Pid};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Registry operation result
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum RegistryError {
    #[error("Process {0} not found")]
    #[diagnostic(
        code(registry::process_not_found),
        help("The process scope was never created or has already been removed.")
    )]
    ProcessNotFound(Pid),

    #[error("Process {0} already registered")]
    #[diagnostic(
        code(registry::process_exists),
        help("Creation is idempotent at the caller's level: treat this as 'scope is present'.")
    )]
    ProcessExists(Pid),

    #[error("Accelerator {accel} not found under process {pid}")]
    #[diagnostic(
        code(registry::accelerator_not_found),
        help("The accelerator scope was never created for this process or has been removed.")
    )]
    AcceleratorNotFound { pid: Pid, accel: AccelId },

    #[error("Accelerator {accel} already registered under process {pid}")]
    #[diagnostic(
        code(registry::accelerator_exists),
        help("The first creation's counters remain in effect; this call changed nothing.")
    )]
    AcceleratorExists { pid: Pid, accel: AccelId },

    #[error("Process scope limit reached ({limit})")]
    #[diagnostic(
        code(registry::too_many_processes),
        help("Remove stale process scopes or raise max_processes in the registry configuration.")
    )]
    TooManyProcesses { limit: usize },

    #[error("Process {pid} already holds {limit} accelerator slots")]
    #[diagnostic(
        code(registry::too_many_accelerators),
        help("A process scope is bounded to the platform's accelerator count.")
    )]
    TooManyAccelerators { pid: Pid, limit: usize },
}

/// Registry construction parameters
///
/// Defaults match the platform bounds; deserializable so deployments can
/// override them from configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct RegistryConfig {
    /// Upper bound on simultaneously registered process scopes
    pub max_processes: usize,
    /// Accelerator slots per process scope, capped at `MAX_ACCELERATORS`
    pub max_accelerators: usize,
}

impl RegistryConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the process-scope bound
    #[must_use]
    pub const fn with_max_processes(mut self, max_processes: usize) -> Self {
        self.max_processes = max_processes;
        self
    }

    /// Override the per-process slot bound
    #[must_use]
    pub const fn with_max_accelerators(mut self, max_accelerators: usize) -> Self {
        self.max_accelerators = max_accelerators;
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_processes: DEFAULT_MAX_PROCESS_SCOPES,
            max_accelerators: MAX_ACCELERATORS,
        }
    }
}
