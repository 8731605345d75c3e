//! Type-safe identifiers for agents and job definitions.
//!
//! Agents are owned by the host simulation; the tactics engine only keys
//! side-tables by their identity. [`AgentId`] wraps a UUID v7 so saved
//! tables sort in creation order. [`JobDefId`] is the opaque handle the
//! host's job registry hands back when a def name is resolved.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Identity of an agent (colonist, visitor, animal) in the host simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AgentId(pub Uuid);

impl AgentId {
    /// Create a new time-ordered identifier (UUID v7).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for AgentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<AgentId> for Uuid {
    fn from(id: AgentId) -> Self {
        id.0
    }
}

/// Opaque handle for a job definition in the host's job registry.
///
/// The numeric value carries no meaning to the tactics engine. Two handles
/// are the same job type iff they compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct JobDefId(pub u32);

impl JobDefId {
    /// Return the raw handle value.
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for JobDefId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "job_def#{}", self.0)
    }
}

impl From<u32> for JobDefId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}
