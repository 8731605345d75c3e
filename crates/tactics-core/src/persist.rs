//! Save and restore of the tactics table.
//!
//! Hosts persist the table as two parallel sequences ([`TacticsSaveData`]).
//! Only the enabled flag survives a save; every agent comes back with no
//! interrupt on record, so the debounce window is expired after a load.

use std::collections::BTreeMap;

use tactics_types::TacticsSaveData;
use tracing::{debug, warn};

use crate::controller::{TacticsController, TacticsState};
use crate::error::TacticsError;
use crate::host::PawnRoster;

impl TacticsController {
    /// Purge destroyed agents, then export the table in identity order.
    pub fn prepare_save(&mut self, roster: &(impl PawnRoster + ?Sized)) -> TacticsSaveData {
        self.purge_destroyed(roster);
        let (agents, enabled) = self
            .states()
            .iter()
            .map(|(&agent, state)| (agent, state.enabled))
            .unzip();
        let data = TacticsSaveData { agents, enabled };
        debug!(entries = data.agents.len(), "Tactics table prepared for save");
        data
    }

    /// Rebuild the table from save data.
    ///
    /// If an agent appears more than once, the last flag wins.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::SaveDataMismatch`] if the sequences have
    /// different lengths. The current table is left untouched.
    pub fn restore(&mut self, data: &TacticsSaveData) -> Result<(), TacticsError> {
        if data.len().is_none() {
            return Err(TacticsError::SaveDataMismatch {
                agents: data.agents.len(),
                flags: data.enabled.len(),
            });
        }

        let mut states = BTreeMap::new();
        for (&agent, &enabled) in data.agents.iter().zip(&data.enabled) {
            let state = TacticsState {
                enabled,
                last_interrupt_tick: None,
            };
            if states.insert(agent, state).is_some() {
                warn!(agent = %agent, "Duplicate agent in tactics save data, keeping last");
            }
        }
        debug!(entries = states.len(), "Tactics table restored");
        self.replace_states(states);
        Ok(())
    }
}
