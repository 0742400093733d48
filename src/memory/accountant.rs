/*!
 * Memory Accountant
 * Registry-backed facade for charge/uncharge and limit control
 */

use super::types::{ChargeKind, MemoryLimit, MemoryUsage};
use crate::core::types::{ControlResult, Identity, Size};
use crate::registry::ProcessRegistry;
use log::{debug, error, info, warn};

/// Charge/uncharge entry point used by the external allocation path
///
/// Resolves the (process, accelerator) identity through the registry on
/// every call; holds no state of its own beyond the registry handle.
#[derive(Clone)]
pub struct MemoryAccountant {
    registry: ProcessRegistry,
}

impl MemoryAccountant {
    #[must_use]
    pub fn new(registry: ProcessRegistry) -> Self {
        Self { registry }
    }

    /// Charge `size` bytes to the identity's selected counter
    ///
    /// Fails with `NotFound` when the identity is not registered and
    /// `LimitExceeded` when the charge does not fit; neither failure moves
    /// any counter.
    pub fn try_charge(
        &self,
        identity: Identity,
        size: Size,
        kind: ChargeKind,
    ) -> ControlResult<()> {
        let entry = self.registry.accelerator(identity)?;

        match entry.memory().try_charge(size, kind) {
            Ok(()) => {
                debug!(
                    "Charged {} bytes ({:?}) to {} (current: {}, swap: {})",
                    size,
                    kind,
                    identity,
                    entry.memory().current(),
                    entry.memory().swap_current()
                );
                Ok(())
            }
            Err(err) => {
                warn!("Charge of {} bytes ({:?}) rejected for {}: {}", size, kind, identity, err);
                Err(err.into())
            }
        }
    }

    /// Release `size` bytes from the identity's selected counter
    ///
    /// An over-release clamps to zero and returns `Underflow`.
    pub fn uncharge(
        &self,
        identity: Identity,
        size: Size,
        kind: ChargeKind,
    ) -> ControlResult<()> {
        let entry = self.registry.accelerator(identity)?;

        match entry.memory().uncharge(size, kind) {
            Ok(()) => {
                debug!("Uncharged {} bytes ({:?}) from {}", size, kind, identity);
                Ok(())
            }
            Err(err) => {
                error!("Uncharge of {} bytes ({:?}) from {}: {}", size, kind, identity, err);
                Err(err.into())
            }
        }
    }

    /// Bytes currently charged to primary device memory
    pub fn current(&self, identity: Identity) -> ControlResult<Size> {
        Ok(self.registry.accelerator(identity)?.memory().current())
    }

    /// Bytes currently charged to the swap overflow counter
    pub fn swap_current(&self, identity: Identity) -> ControlResult<Size> {
        Ok(self.registry.accelerator(identity)?.memory().swap_current())
    }

    /// Configured ceiling for the identity
    pub fn limit(&self, identity: Identity) -> ControlResult<MemoryLimit> {
        Ok(self.registry.accelerator(identity)?.memory().limit())
    }

    /// Replace the identity's ceiling
    pub fn set_limit(&self, identity: Identity, limit: MemoryLimit) -> ControlResult<()> {
        let entry = self.registry.accelerator(identity)?;
        entry.memory().set_limit(limit);
        info!("Memory limit for {} set to {}", identity, limit);
        Ok(())
    }

    /// Point-in-time copy of the identity's accounting state
    pub fn usage(&self, identity: Identity) -> ControlResult<MemoryUsage> {
        Ok(self.registry.accelerator(identity)?.memory().usage())
    }
}
