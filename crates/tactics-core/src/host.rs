//! Capabilities the host simulation provides to the tactics engine.
//!
//! The engine never reaches into host internals. Everything it needs is
//! expressed as a narrow trait here, implemented by the host integration
//! layer (or by [`SandboxColony`] in tests and the demo harness).
//!
//! [`SandboxColony`]: crate::sandbox::SandboxColony

use tactics_types::{AgentId, JobDefId};

/// Read-only queries about agents owned by the host.
pub trait PawnRoster {
    /// Whether the agent is a colonist, i.e. a player-owned agent type.
    ///
    /// This is structural and does not change while the agent exists.
    fn is_colonist(&self, agent: AgentId) -> bool;

    /// Whether the agent is a colonist the player can select and command
    /// right now (not downed, not mentally broken, not under AI control).
    fn is_colonist_player_controlled(&self, agent: AgentId) -> bool;

    /// Whether the host has destroyed the agent.
    fn is_destroyed(&self, agent: AgentId) -> bool;
}

/// Resolution of job def names against the host's job registry.
pub trait JobDefRegistry {
    /// Look up a job def by name. Returns `None` if this host version does
    /// not define it.
    fn resolve(&self, def_name: &str) -> Option<JobDefId>;
}

/// The two host actions that make up an interrupt.
pub trait SupervisorControls {
    /// Jump the camera to the agent and select it.
    fn focus_agent(&mut self, agent: AgentId);

    /// Pause the simulation clock.
    fn pause(&mut self);
}

/// Everything the job-cleanup hook needs from the host in one bound.
pub trait TacticsHost: PawnRoster + JobDefRegistry + SupervisorControls {
    /// The current simulation tick.
    fn current_tick(&self) -> u64;
}

/// View of one agent's job tracker at the moment its current job is about
/// to be cleared.
pub trait AgentActivityView {
    /// The agent that owns this job tracker, or `None` if the host cannot
    /// supply it.
    fn agent(&self) -> Option<AgentId>;

    /// The job type the agent is finishing, if any.
    fn current_job(&self) -> Option<JobDefId>;

    /// Number of jobs still queued behind the current one.
    fn queue_len(&self) -> usize;

    /// Whether the host lets the player interrupt the current job.
    fn is_current_job_player_interruptible(&self) -> bool;
}

/// A plain-data [`AgentActivityView`], for hosts that copy tracker fields
/// out before dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivitySnapshot {
    /// Owning agent, if known.
    pub agent: Option<AgentId>,
    /// Current job type, if any.
    pub current_job: Option<JobDefId>,
    /// Queued job count.
    pub queue_len: usize,
    /// Whether the current job is player-interruptible.
    pub player_interruptible: bool,
}

impl AgentActivityView for ActivitySnapshot {
    fn agent(&self) -> Option<AgentId> {
        self.agent
    }

    fn current_job(&self) -> Option<JobDefId> {
        self.current_job
    }

    fn queue_len(&self) -> usize {
        self.queue_len
    }

    fn is_current_job_player_interruptible(&self) -> bool {
        self.player_interruptible
    }
}
