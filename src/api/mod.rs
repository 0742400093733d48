/*!
 * External Call Boundary
 * Status-code entry points for the introspection, scheduler, and
 * measurement collaborators
 */

pub mod attr;
pub mod control;
pub mod lifecycle;
pub mod status;

// Re-export for convenience
pub use attr::Attr;
pub use control::EventCountUpdate;
pub use status::Status;

use crate::events::EventRecorder;
use crate::memory::MemoryAccountant;
use crate::registry::{ProcessRegistry, RegistryConfig};
use crate::sched::PolicyController;
use log::info;

/// One controller instance: the registry plus the facades the external
/// collaborators call through
///
/// Constructed explicitly at module bring-up and passed by reference to
/// every operation; `shutdown` drains all scopes at teardown. Clones share
/// the same underlying state.
#[derive(Clone)]
pub struct Controller {
    registry: ProcessRegistry,
    accountant: MemoryAccountant,
    policy: PolicyController,
    recorder: EventRecorder,
}

impl Controller {
    /// Controller with platform-default bounds
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Controller with explicit registry bounds
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        let registry = ProcessRegistry::with_config(config);
        info!("Controller initialized");
        Self {
            accountant: MemoryAccountant::new(registry.clone()),
            policy: PolicyController::new(registry.clone()),
            recorder: EventRecorder::new(registry.clone()),
            registry,
        }
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    #[inline]
    #[must_use]
    pub fn accountant(&self) -> &MemoryAccountant {
        &self.accountant
    }

    #[inline]
    #[must_use]
    pub fn policy(&self) -> &PolicyController {
        &self.policy
    }

    #[inline]
    #[must_use]
    pub fn recorder(&self) -> &EventRecorder {
        &self.recorder
    }

    /// Drain every scope; called once at module teardown
    pub fn shutdown(&self) {
        self.registry.clear();
        info!("Controller shut down");
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}
