/*!
 * Scope Lifecycle Calls
 * Create/remove entry points driven by the external process-lifecycle
 * collaborator
 */

use super::status::Status;
use super::Controller;
use crate::core::types::{AccelId, Identity, Pid};
use log::debug;

impl Controller {
    /// Register an empty scope for `pid`
    ///
    /// `EXISTS` reports a duplicate without disturbing the present scope.
    pub fn create_process_scope(&self, pid: Pid) -> Status {
        let status = Status::from_result(self.registry().create_process(pid));
        debug!("create_process_scope({}) -> {}", pid, status);
        status
    }

    /// Tear down `pid`'s scope and every accelerator slot under it
    ///
    /// Removal of an unknown pid reports `NOT_FOUND`, never success.
    pub fn remove_process_scope(&self, pid: Pid) -> Status {
        let status = Status::from_result(self.registry().remove_process(pid));
        debug!("remove_process_scope({}) -> {}", pid, status);
        status
    }

    /// Register an accelerator slot under an existing process scope
    pub fn create_accelerator_scope(&self, pid: Pid, accel: AccelId) -> Status {
        let status =
            Status::from_result(self.registry().create_accelerator(Identity::new(pid, accel)));
        debug!("create_accelerator_scope({}, {}) -> {}", pid, accel, status);
        status
    }

    /// Detach one accelerator slot, releasing its counters with it
    pub fn remove_accelerator_scope(&self, pid: Pid, accel: AccelId) -> Status {
        let status =
            Status::from_result(self.registry().remove_accelerator(Identity::new(pid, accel)));
        debug!("remove_accelerator_scope({}, {}) -> {}", pid, accel, status);
        status
    }
}
