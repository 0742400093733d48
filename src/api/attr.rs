/*!
 * Attribute Nodes
 * The per-identity node namespace served to the introspection layer
 */

use super::Controller;
use crate::core::errors::ControlError;
use crate::core::types::{ControlResult, Identity};
use crate::memory::MemoryLimit;
use log::warn;
use serde::{Deserialize, Serialize};

/// Nodes exposed under `/processes/<pid>/<accelerator_id>/`
///
/// The introspection layer enumerates `Attr::ALL` to build each directory
/// and funnels node I/O through `read_attr`/`write_attr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attr {
    /// `memory.limit` (read-write): configured ceiling, `max` for unlimited
    MemoryLimit,
    /// `memory.current` (read-only): bytes charged to device memory
    MemoryCurrent,
    /// `memory.swap.current` (read-only): bytes charged to the overflow counter
    MemorySwapCurrent,
    /// `compute.priority` (read-write): ordinal scheduling weight
    ComputePriority,
    /// `compute.freeze` (read-write): 1 parks dispatch, 0 releases it
    ComputeFreeze,
    /// `gcgroup.stat` (read-only): flat diagnostic snapshot
    Stat,
}

impl Attr {
    /// Every node in directory order
    pub const ALL: [Attr; 6] = [
        Attr::MemoryLimit,
        Attr::MemoryCurrent,
        Attr::MemorySwapCurrent,
        Attr::ComputePriority,
        Attr::ComputeFreeze,
        Attr::Stat,
    ];

    /// File name within the identity's directory
    #[inline]
    #[must_use]
    pub const fn node_name(&self) -> &'static str {
        match self {
            Attr::MemoryLimit => "memory.limit",
            Attr::MemoryCurrent => "memory.current",
            Attr::MemorySwapCurrent => "memory.swap.current",
            Attr::ComputePriority => "compute.priority",
            Attr::ComputeFreeze => "compute.freeze",
            Attr::Stat => "gcgroup.stat",
        }
    }

    /// Whether the node accepts writes
    #[inline]
    #[must_use]
    pub const fn writable(&self) -> bool {
        matches!(
            self,
            Attr::MemoryLimit | Attr::ComputePriority | Attr::ComputeFreeze
        )
    }

    /// Resolve a file name back to its node
    #[must_use]
    pub fn from_node_name(name: &str) -> Option<Attr> {
        Attr::ALL.into_iter().find(|attr| attr.node_name() == name)
    }
}

impl Controller {
    /// Serve a node read: the text content, newline-terminated
    pub fn read_attr(&self, identity: Identity, attr: Attr) -> ControlResult<String> {
        let text = match attr {
            Attr::MemoryLimit => format!("{}\n", self.accountant().limit(identity)?),
            Attr::MemoryCurrent => format!("{}\n", self.accountant().current(identity)?),
            Attr::MemorySwapCurrent => format!("{}\n", self.accountant().swap_current(identity)?),
            Attr::ComputePriority => format!("{}\n", self.policy().priority(identity)?),
            Attr::ComputeFreeze => {
                format!("{}\n", u8::from(self.policy().frozen(identity)?))
            }
            Attr::Stat => self.registry().stat(identity)?.to_string(),
        };
        Ok(text)
    }

    /// Apply a node write
    ///
    /// Read-only nodes reject with `ReadOnlyNode`; malformed input rejects
    /// with `InvalidInput` before any state is touched.
    pub fn write_attr(&self, identity: Identity, attr: Attr, input: &str) -> ControlResult<()> {
        match attr {
            Attr::MemoryLimit => {
                let limit =
                    MemoryLimit::parse(input).ok_or_else(|| invalid(identity, attr, input))?;
                self.accountant().set_limit(identity, limit)
            }
            Attr::ComputePriority => {
                let priority: u32 = input
                    .trim()
                    .parse()
                    .map_err(|_| invalid(identity, attr, input))?;
                self.policy().set_priority(identity, priority)
            }
            Attr::ComputeFreeze => {
                let frozen =
                    parse_bool01(input).ok_or_else(|| invalid(identity, attr, input))?;
                self.policy().set_frozen(identity, frozen)
            }
            Attr::MemoryCurrent | Attr::MemorySwapCurrent | Attr::Stat => {
                warn!(
                    "Write to read-only node {} rejected for {}",
                    attr.node_name(),
                    identity
                );
                Err(ControlError::ReadOnlyNode {
                    node: attr.node_name().to_string(),
                })
            }
        }
    }
}

fn invalid(identity: Identity, attr: Attr, input: &str) -> ControlError {
    warn!(
        "Malformed write {:?} to node {} rejected for {}",
        input.trim(),
        attr.node_name(),
        identity
    );
    ControlError::InvalidInput {
        node: attr.node_name().to_string(),
        input: input.trim().to_string(),
    }
}

fn parse_bool01(input: &str) -> Option<bool> {
    match input.trim() {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}
