/*!
 * Policy Controller
 * Registry-backed facade for scheduling-parameter reads and writes
 */

use super::types::PolicySnapshot;
use crate::core::types::{ControlResult, Identity};
use crate::registry::ProcessRegistry;
use log::{info, warn};
use std::time::Duration;

/// Policy entry point used by the external scheduler/admin path
///
/// Writes are accepted independent of the freeze flag: freezing an identity
/// does not lock its other parameters.
#[derive(Clone)]
pub struct PolicyController {
    registry: ProcessRegistry,
}

impl PolicyController {
    #[must_use]
    pub fn new(registry: ProcessRegistry) -> Self {
        Self { registry }
    }

    pub fn set_priority(&self, identity: Identity, priority: u32) -> ControlResult<()> {
        let entry = self.registry.accelerator(identity)?;
        match entry.policy().set_priority(priority) {
            Ok(()) => {
                info!("Priority for {} set to {}", identity, priority);
                Ok(())
            }
            Err(err) => {
                warn!("Priority write rejected for {}: {}", identity, err);
                Err(err.into())
            }
        }
    }

    pub fn priority(&self, identity: Identity) -> ControlResult<u32> {
        Ok(self.registry.accelerator(identity)?.policy().priority())
    }

    /// Record the freeze flag; the external dispatcher consults it before
    /// each future dispatch decision
    pub fn set_frozen(&self, identity: Identity, frozen: bool) -> ControlResult<()> {
        let entry = self.registry.accelerator(identity)?;
        entry.policy().set_frozen(frozen);
        info!(
            "{} is now {}",
            identity,
            if frozen { "frozen" } else { "runnable" }
        );
        Ok(())
    }

    pub fn frozen(&self, identity: Identity) -> ControlResult<bool> {
        Ok(self.registry.accelerator(identity)?.policy().frozen())
    }

    pub fn set_realtime(&self, identity: Identity, realtime: bool) -> ControlResult<()> {
        let entry = self.registry.accelerator(identity)?;
        entry.policy().set_realtime(realtime);
        info!(
            "Realtime class for {} {}",
            identity,
            if realtime { "requested" } else { "cleared" }
        );
        Ok(())
    }

    pub fn realtime(&self, identity: Identity) -> ControlResult<bool> {
        Ok(self.registry.accelerator(identity)?.policy().realtime())
    }

    pub fn set_timeslice(&self, identity: Identity, quantum: Duration) -> ControlResult<()> {
        let entry = self.registry.accelerator(identity)?;
        match entry.policy().set_timeslice(quantum) {
            Ok(()) => {
                info!("Timeslice for {} set to {:?}", identity, quantum);
                Ok(())
            }
            Err(err) => {
                warn!("Timeslice write rejected for {}: {}", identity, err);
                Err(err.into())
            }
        }
    }

    pub fn timeslice(&self, identity: Identity) -> ControlResult<Duration> {
        Ok(self.registry.accelerator(identity)?.policy().timeslice())
    }

    pub fn set_interleave_level(&self, identity: Identity, level: u32) -> ControlResult<()> {
        let entry = self.registry.accelerator(identity)?;
        match entry.policy().set_interleave_level(level) {
            Ok(()) => {
                info!("Interleave level for {} set to {}", identity, level);
                Ok(())
            }
            Err(err) => {
                warn!("Interleave write rejected for {}: {}", identity, err);
                Err(err.into())
            }
        }
    }

    pub fn interleave_level(&self, identity: Identity) -> ControlResult<u32> {
        Ok(self
            .registry
            .accelerator(identity)?
            .policy()
            .interleave_level())
    }

    /// Point-in-time copy of the identity's scheduling parameters
    pub fn snapshot(&self, identity: Identity) -> ControlResult<PolicySnapshot> {
        Ok(self.registry.accelerator(identity)?.policy().snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ControlError;
    use crate::registry::RegistryError;
    use crate::sched::PolicyError;

    fn controller_with_identity(identity: Identity) -> PolicyController {
        let registry = ProcessRegistry::new();
        registry.create_process(identity.pid).unwrap();
        registry.create_accelerator(identity).unwrap();
        PolicyController::new(registry)
    }

    #[test]
    fn test_unknown_identity_is_not_found() {
        let controller = PolicyController::new(ProcessRegistry::new());
        let err = controller.priority(Identity::new(9, 9)).unwrap_err();
        assert!(matches!(
            err,
            ControlError::Registry(RegistryError::ProcessNotFound(9))
        ));
    }

    #[test]
    fn test_set_and_read_back() {
        let identity = Identity::new(5, 1);
        let controller = controller_with_identity(identity);

        controller.set_priority(identity, 75).unwrap();
        assert_eq!(controller.priority(identity).unwrap(), 75);

        controller.set_frozen(identity, true).unwrap();
        assert!(controller.frozen(identity).unwrap());

        controller
            .set_timeslice(identity, Duration::from_micros(250))
            .unwrap();
        assert_eq!(
            controller.timeslice(identity).unwrap(),
            Duration::from_micros(250)
        );
    }

    #[test]
    fn test_invalid_write_reports_and_preserves() {
        let identity = Identity::new(5, 1);
        let controller = controller_with_identity(identity);

        controller.set_interleave_level(identity, 2).unwrap();
        let err = controller.set_interleave_level(identity, 99).unwrap_err();
        assert!(matches!(
            err,
            ControlError::Policy(PolicyError::InvalidInterleave { value: 99, .. })
        ));
        assert_eq!(controller.interleave_level(identity).unwrap(), 2);
    }

    #[test]
    fn test_frozen_identity_still_accepts_policy_writes() {
        let identity = Identity::new(6, 0);
        let controller = controller_with_identity(identity);

        controller.set_frozen(identity, true).unwrap();
        controller.set_realtime(identity, true).unwrap();
        controller.set_priority(identity, 10).unwrap();

        let snapshot = controller.snapshot(identity).unwrap();
        assert!(snapshot.frozen);
        assert!(snapshot.realtime);
        assert_eq!(snapshot.priority, 10);
    }
}
