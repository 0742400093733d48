/*!
 * Status Codes
 * errno-style result codes for the external call boundary
 */

use crate::core::errors::ControlError;
use crate::events::EventError;
use crate::memory::MemoryError;
use crate::registry::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// errno-style code returned by every external call
///
/// 0 is success, failures are negative codes from the host's errno
/// vocabulary. The boundary never panics across the call: every internal
/// error collapses into one of these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(i32);

impl Status {
    pub const OK: Status = Status(0);
    /// Identity does not exist (ENOENT)
    pub const NOT_FOUND: Status = Status(-2);
    /// Charge would exceed the configured limit (ENOMEM)
    pub const LIMIT_EXCEEDED: Status = Status(-12);
    /// Write to a read-only node (EACCES)
    pub const READ_ONLY: Status = Status(-13);
    /// Duplicate creation (EEXIST)
    pub const EXISTS: Status = Status(-17);
    /// Policy or input value out of the allowed range (EINVAL)
    pub const INVALID_ARGUMENT: Status = Status(-22);
    /// Scope capacity exhausted (ENOSPC)
    pub const CAPACITY_EXCEEDED: Status = Status(-28);
    /// Uncharge exceeded the current charge (ERANGE)
    pub const UNDERFLOW: Status = Status(-34);

    /// Raw code for the wire
    #[inline]
    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_ok(self) -> bool {
        self.0 == 0
    }

    /// Collapse a typed result into a wire code
    #[must_use]
    pub fn from_result<E: Into<ControlError>>(result: Result<(), E>) -> Status {
        match result {
            Ok(()) => Status::OK,
            Err(err) => Status::from(&err.into()),
        }
    }
}

impl From<&ControlError> for Status {
    fn from(err: &ControlError) -> Self {
        match err {
            ControlError::Registry(e) => match e {
                RegistryError::ProcessNotFound(_)
                | RegistryError::AcceleratorNotFound { .. } => Status::NOT_FOUND,
                RegistryError::ProcessExists(_) | RegistryError::AcceleratorExists { .. } => {
                    Status::EXISTS
                }
                RegistryError::TooManyProcesses { .. }
                | RegistryError::TooManyAccelerators { .. } => Status::CAPACITY_EXCEEDED,
            },
            ControlError::Memory(e) => match e {
                MemoryError::LimitExceeded { .. } => Status::LIMIT_EXCEEDED,
                MemoryError::Underflow { .. } => Status::UNDERFLOW,
            },
            ControlError::Policy(_) => Status::INVALID_ARGUMENT,
            ControlError::Event(EventError::UnknownKind(_)) => Status::INVALID_ARGUMENT,
            ControlError::ReadOnlyNode { .. } => Status::READ_ONLY,
            ControlError::InvalidInput { .. } => Status::INVALID_ARGUMENT,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Identity;

    #[test]
    fn test_ok_is_zero() {
        assert_eq!(Status::OK.code(), 0);
        assert!(Status::OK.is_ok());
        assert!(!Status::NOT_FOUND.is_ok());
    }

    #[test]
    fn test_every_taxonomy_member_has_a_code() {
        let identity = Identity::new(1, 0);

        let cases: Vec<(ControlError, Status)> = vec![
            (
                RegistryError::ProcessNotFound(identity.pid).into(),
                Status::NOT_FOUND,
            ),
            (
                RegistryError::AcceleratorExists {
                    pid: identity.pid,
                    accel: identity.accel,
                }
                .into(),
                Status::EXISTS,
            ),
            (
                RegistryError::TooManyAccelerators {
                    pid: identity.pid,
                    limit: 32,
                }
                .into(),
                Status::CAPACITY_EXCEEDED,
            ),
            (
                MemoryError::LimitExceeded {
                    requested: 2,
                    limit: 1,
                    current: 0,
                }
                .into(),
                Status::LIMIT_EXCEEDED,
            ),
            (
                MemoryError::Underflow {
                    requested: 2,
                    charged: 1,
                }
                .into(),
                Status::UNDERFLOW,
            ),
            (
                crate::sched::PolicyError::InvalidPriority {
                    value: 999,
                    min: 0,
                    max: 100,
                }
                .into(),
                Status::INVALID_ARGUMENT,
            ),
            (EventError::UnknownKind(99).into(), Status::INVALID_ARGUMENT),
            (
                ControlError::ReadOnlyNode {
                    node: "memory.current".into(),
                },
                Status::READ_ONLY,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(Status::from(&error), expected, "for {error}");
        }
    }

    #[test]
    fn test_from_result_collapses() {
        let ok: Result<(), RegistryError> = Ok(());
        assert_eq!(Status::from_result(ok), Status::OK);

        let err: Result<(), RegistryError> = Err(RegistryError::ProcessNotFound(1));
        assert_eq!(Status::from_result(err), Status::NOT_FOUND);
    }
}
