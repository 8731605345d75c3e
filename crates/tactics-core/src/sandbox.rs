//! In-memory host for tests and the demo harness.
//!
//! [`SandboxColony`] implements every host capability trait with plain
//! collections: a roster of agents with colonist/controllable/destroyed
//! flags, a name-to-handle job registry, a tick counter, a pause flag and
//! the last focused agent. It does no scheduling of its own.

use std::collections::BTreeMap;

use tactics_types::{AgentId, JobDefId};

use crate::host::{JobDefRegistry, PawnRoster, SupervisorControls, TacticsHost};
use crate::whitelist::JOB_TYPE_WHITELIST_NAMES;

/// Job defs the sandbox registers besides the whitelisted ones. None of
/// them is routine.
pub const SANDBOX_EXTRA_JOB_NAMES: &[&str] = &[
    "Research",
    "Wait",
    "Wait_Combat",
    "LayDown",
    "AttackMelee",
    "AttackStatic",
    "Lovin",
    "SocialFight",
    "GotoWander",
    "Flee",
    "Meditate",
];

/// Host-owned flags for one sandbox agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SandboxPawn {
    /// Player-owned agent type.
    pub colonist: bool,
    /// Selectable and commandable right now.
    pub controllable: bool,
    /// Removed from the world.
    pub destroyed: bool,
}

/// A minimal colony implementing [`TacticsHost`].
#[derive(Debug, Clone)]
pub struct SandboxColony {
    tick: u64,
    paused: bool,
    focused: Option<AgentId>,
    interrupt_count: u64,
    pawns: BTreeMap<AgentId, SandboxPawn>,
    job_defs: BTreeMap<String, JobDefId>,
    next_job_def: u32,
}

impl Default for SandboxColony {
    fn default() -> Self {
        Self::new()
    }
}

impl SandboxColony {
    /// Create a colony at tick 0 with every whitelisted job def and
    /// [`SANDBOX_EXTRA_JOB_NAMES`] registered.
    pub fn new() -> Self {
        let mut colony = Self {
            tick: 0,
            paused: false,
            focused: None,
            interrupt_count: 0,
            pawns: BTreeMap::new(),
            job_defs: BTreeMap::new(),
            next_job_def: 0,
        };
        for name in JOB_TYPE_WHITELIST_NAMES.iter().chain(SANDBOX_EXTRA_JOB_NAMES) {
            colony.register_job_def(name);
        }
        colony
    }

    // -----------------------------------------------------------------------
    // Job registry
    // -----------------------------------------------------------------------

    /// Register a job def, returning its handle. Re-registering a name
    /// returns the existing handle.
    pub fn register_job_def(&mut self, name: &str) -> JobDefId {
        if let Some(&def) = self.job_defs.get(name) {
            return def;
        }
        let def = JobDefId(self.next_job_def);
        self.next_job_def = self.next_job_def.saturating_add(1);
        self.job_defs.insert(name.to_owned(), def);
        def
    }

    /// Drop a job def, as if this host version did not define it.
    pub fn remove_job_def(&mut self, name: &str) -> Option<JobDefId> {
        self.job_defs.remove(name)
    }

    /// All registered job def names.
    pub fn job_def_names(&self) -> impl Iterator<Item = &str> {
        self.job_defs.keys().map(String::as_str)
    }

    // -----------------------------------------------------------------------
    // Roster
    // -----------------------------------------------------------------------

    /// Add a controllable colonist.
    pub fn spawn_colonist(&mut self) -> AgentId {
        self.spawn(SandboxPawn {
            colonist: true,
            controllable: true,
            destroyed: false,
        })
    }

    /// Add a non-colonist agent (visitor, animal, raider).
    pub fn spawn_visitor(&mut self) -> AgentId {
        self.spawn(SandboxPawn {
            colonist: false,
            controllable: false,
            destroyed: false,
        })
    }

    /// Add an agent with explicit flags.
    pub fn spawn(&mut self, pawn: SandboxPawn) -> AgentId {
        let id = AgentId::new();
        self.pawns.insert(id, pawn);
        id
    }

    /// Flags for an agent, if it was ever spawned here.
    pub fn pawn(&self, agent: AgentId) -> Option<SandboxPawn> {
        self.pawns.get(&agent).copied()
    }

    /// Agents that are not destroyed, in identity order.
    pub fn living_agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.pawns
            .iter()
            .filter(|(_, pawn)| !pawn.destroyed)
            .map(|(&id, _)| id)
    }

    /// Change whether a colonist is under player control.
    pub fn set_controllable(&mut self, agent: AgentId, controllable: bool) {
        if let Some(pawn) = self.pawns.get_mut(&agent) {
            pawn.controllable = controllable;
        }
    }

    /// Mark an agent destroyed.
    pub fn destroy(&mut self, agent: AgentId) {
        if let Some(pawn) = self.pawns.get_mut(&agent) {
            pawn.destroyed = true;
            pawn.controllable = false;
        }
    }

    // -----------------------------------------------------------------------
    // Clock and camera
    // -----------------------------------------------------------------------

    /// Advance one tick and return the new tick.
    pub const fn advance(&mut self) -> u64 {
        self.tick = self.tick.saturating_add(1);
        self.tick
    }

    /// Jump the clock to an absolute tick.
    pub const fn set_tick(&mut self, tick: u64) {
        self.tick = tick;
    }

    /// Whether the clock is paused.
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Unpause, as the player would.
    pub const fn resume(&mut self) {
        self.paused = false;
    }

    /// The last agent the camera was sent to.
    pub const fn focused(&self) -> Option<AgentId> {
        self.focused
    }

    /// How many times the clock has been paused by an interrupt.
    pub const fn interrupt_count(&self) -> u64 {
        self.interrupt_count
    }
}

impl PawnRoster for SandboxColony {
    fn is_colonist(&self, agent: AgentId) -> bool {
        self.pawns.get(&agent).is_some_and(|pawn| pawn.colonist)
    }

    fn is_colonist_player_controlled(&self, agent: AgentId) -> bool {
        self.pawns
            .get(&agent)
            .is_some_and(|pawn| pawn.colonist && pawn.controllable && !pawn.destroyed)
    }

    fn is_destroyed(&self, agent: AgentId) -> bool {
        self.pawns.get(&agent).is_some_and(|pawn| pawn.destroyed)
    }
}

impl JobDefRegistry for SandboxColony {
    fn resolve(&self, def_name: &str) -> Option<JobDefId> {
        self.job_defs.get(def_name).copied()
    }
}

impl SupervisorControls for SandboxColony {
    fn focus_agent(&mut self, agent: AgentId) {
        self.focused = Some(agent);
    }

    fn pause(&mut self) {
        self.paused = true;
        self.interrupt_count = self.interrupt_count.saturating_add(1);
    }
}

impl TacticsHost for SandboxColony {
    fn current_tick(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_whitelist_and_extras() {
        let colony = SandboxColony::new();
        let expected = JOB_TYPE_WHITELIST_NAMES
            .len()
            .saturating_add(SANDBOX_EXTRA_JOB_NAMES.len());
        assert_eq!(colony.job_def_names().count(), expected);
        assert!(colony.resolve("Clean").is_some());
        assert!(colony.resolve("Research").is_some());
        assert!(colony.resolve("NoSuchJob").is_none());
    }

    #[test]
    fn register_is_stable_for_same_name() {
        let mut colony = SandboxColony::new();
        let first = colony.register_job_def("Custom");
        let second = colony.register_job_def("Custom");
        assert_eq!(first, second);
        assert_ne!(colony.resolve("Clean"), Some(first));
    }

    #[test]
    fn destroyed_pawn_is_not_controlled() {
        let mut colony = SandboxColony::new();
        let agent = colony.spawn_colonist();
        assert!(colony.is_colonist_player_controlled(agent));
        colony.destroy(agent);
        assert!(colony.is_destroyed(agent));
        assert!(colony.is_colonist(agent));
        assert!(!colony.is_colonist_player_controlled(agent));
        assert_eq!(colony.living_agents().count(), 0);
    }

    #[test]
    fn unknown_agent_has_no_flags() {
        let colony = SandboxColony::new();
        let stranger = AgentId::new();
        assert!(!colony.is_colonist(stranger));
        assert!(!colony.is_destroyed(stranger));
        assert!(colony.pawn(stranger).is_none());
    }

    #[test]
    fn pause_and_resume() {
        let mut colony = SandboxColony::new();
        colony.pause();
        assert!(colony.is_paused());
        assert_eq!(colony.interrupt_count(), 1);
        colony.resume();
        assert!(!colony.is_paused());
        assert_eq!(colony.advance(), 1);
    }
}
