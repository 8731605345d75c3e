//! The per-colonist tactics toggle offered to the host UI.

use tactics_types::{AgentId, ToggleCommand};

use crate::controller::TacticsController;
use crate::host::PawnRoster;

/// Button label.
pub const TOGGLE_LABEL: &str = "Tactics";

/// Button tooltip.
pub const TOGGLE_DESCRIPTION: &str = "Toggle tactics mode for this colonist. The game will pause and center on the colonist when they finish a job, allowing you to micromanage them.";

/// Host texture path for the button icon.
pub const TOGGLE_ICON: &str = "Buttons/Pawn";

/// Describe the toggle for `agent`, or `None` if the agent can never be in
/// tactics mode and should not get one.
pub fn toggle_command(
    controller: &TacticsController,
    roster: &(impl PawnRoster + ?Sized),
    agent: AgentId,
) -> Option<ToggleCommand> {
    if !controller.can_ever_enable(roster, agent) {
        return None;
    }
    Some(ToggleCommand {
        agent_id: agent,
        label: TOGGLE_LABEL.to_owned(),
        description: TOGGLE_DESCRIPTION.to_owned(),
        icon: TOGGLE_ICON.to_owned(),
        is_active: controller.is_enabled_flag(agent),
    })
}
