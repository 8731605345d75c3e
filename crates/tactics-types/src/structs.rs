//! Serializable payloads exchanged with the host.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::AgentId;

/// Persisted tactics table, as two parallel ordered sequences.
///
/// `agents[i]` has tactics mode set to `enabled[i]`. Only the enabled flag
/// is saved; debounce timestamps start over after a load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TacticsSaveData {
    /// Agent identities, in table order.
    pub agents: Vec<AgentId>,
    /// Enabled flag for the agent at the same position.
    pub enabled: Vec<bool>,
}

impl TacticsSaveData {
    /// Number of entries, or `None` if the two sequences disagree.
    pub const fn len(&self) -> Option<usize> {
        if self.agents.len() == self.enabled.len() {
            Some(self.agents.len())
        } else {
            None
        }
    }

    /// Whether both sequences are empty.
    pub const fn is_empty(&self) -> bool {
        self.agents.is_empty() && self.enabled.is_empty()
    }
}

/// Descriptor for the per-colonist tactics toggle button.
///
/// The host UI decides how to draw it; this only carries what to show and
/// whether it is currently on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ToggleCommand {
    /// The agent the toggle controls.
    pub agent_id: AgentId,
    /// Short button label.
    pub label: String,
    /// Tooltip text.
    pub description: String,
    /// Host texture path for the button icon.
    pub icon: String,
    /// Whether tactics mode is currently toggled on.
    pub is_active: bool,
}
