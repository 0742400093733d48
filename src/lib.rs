/*!
 * gcgroup Library
 * Per-process accelerator resource control: a cgroup-like accounting and
 * policy layer keyed by (process, accelerator) identity
 */

pub mod api;
pub mod core;
pub mod events;
pub mod memory;
pub mod registry;
pub mod sched;

// Re-exports
pub use crate::api::{Attr, Controller, EventCountUpdate, Status};
pub use crate::core::errors::{
    ControlError, EventError, MemoryError, PolicyError, RegistryError,
};
pub use crate::core::types::{AccelId, ControlResult, Identity, Pid, Size};
pub use crate::events::{EventKind, EventRecorder, EventSnapshot};
pub use crate::memory::{ChargeKind, MemoryAccountant, MemoryLimit, MemoryUsage};
pub use crate::registry::{
    AcceleratorEntry, ProcessEntry, ProcessRegistry, RegistryConfig, StatSnapshot,
};
pub use crate::sched::{PolicyController, PolicySnapshot};
