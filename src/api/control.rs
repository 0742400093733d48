/*!
 * Accounting, Scheduling, and Diagnostics Calls
 * Status-code entry points for the allocation path, the scheduler/admin
 * path, and the measurement path
 */

use super::status::Status;
use super::Controller;
use crate::core::errors::ControlError;
use crate::core::types::{AccelId, Identity, Pid};
use crate::events::EventKind;
use crate::memory::ChargeKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wire parameters for an update-event-count request
///
/// `kind` carries the raw event discriminant as sent by the measurement
/// path; an unknown value is rejected with `INVALID_ARGUMENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EventCountUpdate {
    pub kind: u32,
    pub delta: u64,
}

impl Controller {
    /// Charge `size` bytes for the identity, against the swap counter when
    /// `use_swap` is set
    pub fn try_charge(&self, pid: Pid, accel: AccelId, size: u64, use_swap: bool) -> Status {
        Status::from_result(self.accountant().try_charge(
            Identity::new(pid, accel),
            size,
            ChargeKind::from_swap_flag(use_swap),
        ))
    }

    /// Release `size` bytes for the identity
    pub fn try_uncharge(&self, pid: Pid, accel: AccelId, size: u64, use_swap: bool) -> Status {
        Status::from_result(self.accountant().uncharge(
            Identity::new(pid, accel),
            size,
            ChargeKind::from_swap_flag(use_swap),
        ))
    }

    /// Allow or park dispatch for the identity
    ///
    /// `enable = false` freezes the identity; the stored freeze flag is the
    /// inverse of the enable bit.
    pub fn schedule_task(&self, pid: Pid, accel: AccelId, enable: bool) -> Status {
        Status::from_result(self.policy().set_frozen(Identity::new(pid, accel), !enable))
    }

    /// Set the identity's time-slice quantum in microseconds
    pub fn set_timeslice(&self, pid: Pid, accel: AccelId, timeslice_us: u64) -> Status {
        Status::from_result(self.policy().set_timeslice(
            Identity::new(pid, accel),
            Duration::from_micros(timeslice_us),
        ))
    }

    /// Request or clear the realtime scheduling class for the identity
    pub fn make_realtime(&self, pid: Pid, accel: AccelId, enable: bool) -> Status {
        Status::from_result(self.policy().set_realtime(Identity::new(pid, accel), enable))
    }

    /// Set how finely the identity's work interleaves with others
    pub fn set_interleave_level(&self, pid: Pid, accel: AccelId, level: u32) -> Status {
        Status::from_result(
            self.policy()
                .set_interleave_level(Identity::new(pid, accel), level),
        )
    }

    /// Push an event sample from the measurement path
    pub fn update_event_count(&self, params: EventCountUpdate, identity: Identity) -> Status {
        let result = EventKind::try_from(params.kind)
            .map_err(ControlError::from)
            .and_then(|kind| self.recorder().add(identity, kind, params.delta));
        Status::from_result(result)
    }
}
