//! Enumeration types for the tactics engine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Derived tactics state of a single agent at a given tick.
///
/// Never stored; computed from the enabled flag and the last interrupt tick.
///
/// - `Disabled` -> `Armed`/`Cooling`: the flag is toggled on.
/// - `Armed` -> `Cooling`: an interrupt fires.
/// - `Cooling` -> `Armed`: the debounce window elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TacticsPhase {
    /// Tactics mode is off for the agent (or no state exists).
    Disabled,
    /// Enabled, and no interrupt has fired within the debounce window.
    Armed,
    /// Enabled, and an interrupt fired within the debounce window.
    Cooling,
}

/// Why a job-cleanup event did not produce an interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum SkipReason {
    /// The host reported the current job as not player-interruptible.
    NotInterruptible,
    /// The agent is not a player-controlled colonist right now, or tactics
    /// mode is off for it.
    NotActive,
    /// The agent still has queued jobs and will not go idle.
    QueueNotEmpty,
    /// The current job is not routine and the last interrupt is too recent.
    CoolingDown,
    /// The current job is not routine and the session is still inside its
    /// first debounce window. No interrupt has fired yet.
    StartupWindow,
}

impl core::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotInterruptible => write!(f, "not_interruptible"),
            Self::NotActive => write!(f, "not_active"),
            Self::QueueNotEmpty => write!(f, "queue_not_empty"),
            Self::CoolingDown => write!(f, "cooling_down"),
            Self::StartupWindow => write!(f, "startup_window"),
        }
    }
}
