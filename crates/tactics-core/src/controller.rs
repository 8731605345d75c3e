//! Per-agent tactics state and the interrupt decision.
//!
//! A [`TacticsController`] is created once per simulation session and handed
//! by reference to whatever dispatches host events. It owns a side-table
//! keyed by [`AgentId`] and decides, every time an agent's job is about to be
//! cleared, whether to hand control back to the player.
//!
//! # Decision
//!
//! An interrupt fires when the agent is active now (a controllable colonist
//! with tactics mode on), has nothing queued, and either is not doing
//! anything, is doing a routine job, or has not been interrupted within the
//! debounce window. The last clause keeps long non-routine jobs from locking
//! the player out forever.

use std::cell::OnceCell;
use std::collections::BTreeMap;

use tactics_types::{AgentId, JobDefId, SkipReason, TacticsPhase};
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_DEBOUNCE_TICKS, EngineConfig};
use crate::error::TacticsError;
use crate::host::{AgentActivityView, JobDefRegistry, PawnRoster, SupervisorControls, TacticsHost};
use crate::whitelist::JobTypeWhitelist;

/// Stored tactics state for one agent.
///
/// A missing entry behaves exactly like `TacticsState::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TacticsState {
    /// Whether tactics mode is toggled on.
    pub enabled: bool,
    /// Tick of the most recent interrupt, if one fired this session.
    pub last_interrupt_tick: Option<u64>,
}

/// Result of evaluating one job-cleanup event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptDecision {
    /// Pause and focus the agent.
    Interrupt,
    /// Let the agent carry on.
    Skip(SkipReason),
}

impl InterruptDecision {
    /// Whether the decision is to interrupt.
    pub const fn is_interrupt(self) -> bool {
        matches!(self, Self::Interrupt)
    }
}

/// What [`TacticsController::on_job_cleanup`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobCleanupOutcome {
    /// The simulation was paused on the agent.
    Interrupted {
        /// The focused agent.
        agent: AgentId,
        /// Tick the interrupt was recorded at.
        tick: u64,
    },
    /// No interrupt.
    Skipped {
        /// The agent the event was about.
        agent: AgentId,
        /// Why nothing happened.
        reason: SkipReason,
    },
}

/// Owner of all per-agent tactics state for a session.
#[derive(Debug, Clone)]
pub struct TacticsController {
    /// Side-table keyed by agent identity.
    states: BTreeMap<AgentId, TacticsState>,

    /// Minimum ticks between interrupts for the same agent.
    debounce_ticks: u64,

    /// Routine job types, resolved on first classification.
    whitelist: OnceCell<JobTypeWhitelist>,
}

impl Default for TacticsController {
    fn default() -> Self {
        Self::with_debounce(DEFAULT_DEBOUNCE_TICKS)
    }
}

impl TacticsController {
    /// Create a controller from engine configuration.
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_debounce(config.debounce_ticks)
    }

    /// Create a controller with an explicit debounce window.
    pub const fn with_debounce(debounce_ticks: u64) -> Self {
        Self {
            states: BTreeMap::new(),
            debounce_ticks,
            whitelist: OnceCell::new(),
        }
    }

    /// Use an already-resolved whitelist instead of building one lazily.
    #[must_use]
    pub fn with_whitelist(self, whitelist: JobTypeWhitelist) -> Self {
        Self {
            whitelist: OnceCell::from(whitelist),
            ..self
        }
    }

    /// The configured debounce window in ticks.
    pub const fn debounce_ticks(&self) -> u64 {
        self.debounce_ticks
    }

    /// The routine-job whitelist, resolving it against `registry` on first
    /// use. Later calls ignore `registry`.
    pub fn whitelist(&self, registry: &(impl JobDefRegistry + ?Sized)) -> &JobTypeWhitelist {
        self.whitelist
            .get_or_init(|| JobTypeWhitelist::build(registry))
    }

    // -----------------------------------------------------------------------
    // Enable / disable
    // -----------------------------------------------------------------------

    /// Whether the agent could ever be in tactics mode. Depends only on the
    /// agent's type, never on stored state.
    #[allow(clippy::unused_self)]
    pub fn can_ever_enable(&self, roster: &(impl PawnRoster + ?Sized), agent: AgentId) -> bool {
        roster.is_colonist(agent)
    }

    /// The stored enabled flag; `false` for agents with no state.
    pub fn is_enabled_flag(&self, agent: AgentId) -> bool {
        self.states.get(&agent).is_some_and(|state| state.enabled)
    }

    /// Set the enabled flag.
    ///
    /// Setting it on an agent that can never be in tactics mode is allowed
    /// but logged, since it will never have an effect.
    pub fn set_enabled(
        &mut self,
        roster: &(impl PawnRoster + ?Sized),
        agent: AgentId,
        value: bool,
    ) {
        if !self.can_ever_enable(roster, agent) {
            warn!(
                agent = %agent,
                "Tactics mode set on non-player-controlled agent -- this will have no effect"
            );
        }
        self.states.entry(agent).or_default().enabled = value;
        debug!(agent = %agent, enabled = value, "Tactics mode flag set");
    }

    /// Flip the enabled flag and return the new value.
    pub fn toggle(&mut self, roster: &(impl PawnRoster + ?Sized), agent: AgentId) -> bool {
        let value = !self.is_enabled_flag(agent);
        self.set_enabled(roster, agent, value);
        value
    }

    /// Whether the agent is eligible for an interrupt right now: a colonist,
    /// currently under player control, with tactics mode on.
    pub fn is_active_now(&self, roster: &(impl PawnRoster + ?Sized), agent: AgentId) -> bool {
        self.can_ever_enable(roster, agent)
            && roster.is_colonist_player_controlled(agent)
            && self.is_enabled_flag(agent)
    }

    // -----------------------------------------------------------------------
    // Debounce
    // -----------------------------------------------------------------------

    /// Stored state for the agent, or the default if none exists.
    pub fn state(&self, agent: AgentId) -> TacticsState {
        self.states.get(&agent).copied().unwrap_or_default()
    }

    /// Tick of the last interrupt, or 0 if none fired this session.
    pub fn last_interrupt_tick(&self, agent: AgentId) -> u64 {
        self.state(agent).last_interrupt_tick.unwrap_or(0)
    }

    /// Whether more than the debounce window has passed since the last
    /// interrupt. With no interrupt on record this counts from tick 0.
    pub fn last_interrupt_expired(&self, agent: AgentId, tick: u64) -> bool {
        tick > self
            .last_interrupt_tick(agent)
            .saturating_add(self.debounce_ticks)
    }

    /// Derived phase of the agent at `tick`.
    ///
    /// An agent that has never been interrupted is `Armed`, even during the
    /// first debounce window of the session, when non-routine jobs are still
    /// held back with [`SkipReason::StartupWindow`].
    pub fn phase(&self, agent: AgentId, tick: u64) -> TacticsPhase {
        let state = self.state(agent);
        if !state.enabled {
            return TacticsPhase::Disabled;
        }
        match state.last_interrupt_tick {
            Some(_) if !self.last_interrupt_expired(agent, tick) => TacticsPhase::Cooling,
            _ => TacticsPhase::Armed,
        }
    }

    // -----------------------------------------------------------------------
    // Decision
    // -----------------------------------------------------------------------

    /// Decide whether a job-cleanup event should interrupt, and why not.
    ///
    /// The caller has already checked that the current job is
    /// player-interruptible.
    pub fn evaluate(
        &self,
        host: &(impl PawnRoster + JobDefRegistry + ?Sized),
        agent: AgentId,
        current_job: Option<JobDefId>,
        queue_len: usize,
        tick: u64,
    ) -> InterruptDecision {
        if !self.is_active_now(host, agent) {
            return InterruptDecision::Skip(SkipReason::NotActive);
        }
        if queue_len != 0 {
            return InterruptDecision::Skip(SkipReason::QueueNotEmpty);
        }
        let routine = current_job.is_none_or(|job| self.whitelist(host).is_routine(job));
        if routine || self.last_interrupt_expired(agent, tick) {
            InterruptDecision::Interrupt
        } else if self.state(agent).last_interrupt_tick.is_none() {
            InterruptDecision::Skip(SkipReason::StartupWindow)
        } else {
            InterruptDecision::Skip(SkipReason::CoolingDown)
        }
    }

    /// Whether a job-cleanup event should interrupt.
    pub fn should_interrupt(
        &self,
        host: &(impl PawnRoster + JobDefRegistry + ?Sized),
        agent: AgentId,
        current_job: Option<JobDefId>,
        queue_len: usize,
        tick: u64,
    ) -> bool {
        self.evaluate(host, agent, current_job, queue_len, tick)
            .is_interrupt()
    }

    /// Focus the agent, pause the simulation, and record the tick.
    ///
    /// Does nothing and returns `false` if the agent is not active now.
    /// Repeating the call in the same tick leaves the state unchanged.
    pub fn trigger_interrupt<H>(&mut self, host: &mut H, agent: AgentId, tick: u64) -> bool
    where
        H: PawnRoster + SupervisorControls + ?Sized,
    {
        if !self.is_active_now(&*host, agent) {
            return false;
        }
        host.focus_agent(agent);
        host.pause();
        self.states.entry(agent).or_default().last_interrupt_tick = Some(tick);
        info!(agent = %agent, tick, "Tactics interrupt: paused on agent");
        true
    }

    /// Handle the host's "current job is about to be cleared" event.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::MissingAgent`] if the view has no backing
    /// agent. The interrupt is skipped for this event.
    pub fn on_job_cleanup<H>(
        &mut self,
        host: &mut H,
        view: &(impl AgentActivityView + ?Sized),
    ) -> Result<JobCleanupOutcome, TacticsError>
    where
        H: TacticsHost + ?Sized,
    {
        let agent = view.agent().ok_or(TacticsError::MissingAgent)?;
        if !view.is_current_job_player_interruptible() {
            return Ok(JobCleanupOutcome::Skipped {
                agent,
                reason: SkipReason::NotInterruptible,
            });
        }

        let tick = host.current_tick();
        let decision = self.evaluate(&*host, agent, view.current_job(), view.queue_len(), tick);
        if let InterruptDecision::Skip(reason) = decision {
            debug!(agent = %agent, tick, %reason, "No tactics interrupt");
            return Ok(JobCleanupOutcome::Skipped { agent, reason });
        }

        if self.trigger_interrupt(host, agent, tick) {
            Ok(JobCleanupOutcome::Interrupted { agent, tick })
        } else {
            Ok(JobCleanupOutcome::Skipped {
                agent,
                reason: SkipReason::NotActive,
            })
        }
    }

    // -----------------------------------------------------------------------
    // Table maintenance
    // -----------------------------------------------------------------------

    /// Remove state for every agent the host has destroyed. Returns how many
    /// entries were removed.
    pub fn purge_destroyed(&mut self, roster: &(impl PawnRoster + ?Sized)) -> usize {
        let before = self.states.len();
        self.states.retain(|&agent, _| !roster.is_destroyed(agent));
        let removed = before.saturating_sub(self.states.len());
        if removed > 0 {
            debug!(removed, "Purged tactics state for destroyed agents");
        }
        removed
    }

    /// Agents that currently have stored state, in identity order.
    pub fn tracked_agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.states.keys().copied()
    }

    /// Number of agents with stored state.
    pub fn tracked_len(&self) -> usize {
        self.states.len()
    }

    /// Replace the whole table. Used by save-data restore.
    pub(crate) fn replace_states(&mut self, states: BTreeMap<AgentId, TacticsState>) {
        self.states = states;
    }

    /// Read access to the whole table. Used by save-data export.
    pub(crate) const fn states(&self) -> &BTreeMap<AgentId, TacticsState> {
        &self.states
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::host::ActivitySnapshot;
    use crate::sandbox::SandboxColony;

    fn colony_with_colonist() -> (SandboxColony, AgentId) {
        let mut colony = SandboxColony::new();
        let agent = colony.spawn_colonist();
        (colony, agent)
    }

    fn enabled_controller(colony: &SandboxColony, agent: AgentId) -> TacticsController {
        let mut controller = TacticsController::default();
        controller.set_enabled(colony, agent, true);
        controller
    }

    #[test]
    fn unknown_agent_defaults_to_disabled() {
        let (colony, agent) = colony_with_colonist();
        let controller = TacticsController::default();
        assert!(!controller.is_enabled_flag(agent));
        assert!(!controller.is_enabled_flag(AgentId::new()));
        assert_eq!(controller.state(agent), TacticsState::default());
        assert_eq!(controller.last_interrupt_tick(agent), 0);
        assert!(controller.can_ever_enable(&colony, agent));
        assert_eq!(controller.tracked_len(), 0);
    }

    #[test]
    fn can_ever_enable_ignores_stored_state() {
        let mut colony = SandboxColony::new();
        let visitor = colony.spawn_visitor();
        let mut controller = TacticsController::default();
        assert!(!controller.can_ever_enable(&colony, visitor));
        controller.set_enabled(&colony, visitor, true);
        assert!(!controller.can_ever_enable(&colony, visitor));
    }

    #[test]
    fn set_enabled_twice_is_idempotent() {
        let (colony, agent) = colony_with_colonist();
        let mut once = TacticsController::default();
        once.set_enabled(&colony, agent, true);
        let mut twice = TacticsController::default();
        twice.set_enabled(&colony, agent, true);
        twice.set_enabled(&colony, agent, true);
        assert_eq!(once.state(agent), twice.state(agent));
        assert_eq!(once.tracked_len(), twice.tracked_len());
    }

    #[test]
    fn enabling_ineligible_agent_still_applies() {
        let mut colony = SandboxColony::new();
        let visitor = colony.spawn_visitor();
        let mut controller = TacticsController::default();
        controller.set_enabled(&colony, visitor, true);
        assert!(controller.is_enabled_flag(visitor));
        assert!(!controller.is_active_now(&colony, visitor));
    }

    #[test]
    fn toggle_flips_flag() {
        let (colony, agent) = colony_with_colonist();
        let mut controller = TacticsController::default();
        assert!(controller.toggle(&colony, agent));
        assert!(controller.is_enabled_flag(agent));
        assert!(!controller.toggle(&colony, agent));
        assert!(!controller.is_enabled_flag(agent));
    }

    #[test]
    fn active_now_requires_player_control() {
        let (mut colony, agent) = colony_with_colonist();
        let controller = enabled_controller(&colony, agent);
        assert!(controller.is_active_now(&colony, agent));
        colony.set_controllable(agent, false);
        assert!(!controller.is_active_now(&colony, agent));
        assert!(controller.is_enabled_flag(agent));
    }

    #[test]
    fn expiry_counts_from_zero_without_interrupt() {
        let (colony, agent) = colony_with_colonist();
        let controller = enabled_controller(&colony, agent);
        assert!(!controller.last_interrupt_expired(agent, 90));
        assert!(controller.last_interrupt_expired(agent, 91));
    }

    #[test]
    fn expiry_saturates_near_tick_max() {
        let (mut colony, agent) = colony_with_colonist();
        let mut controller = enabled_controller(&colony, agent);
        assert!(controller.trigger_interrupt(&mut colony, agent, u64::MAX - 10));
        assert!(!controller.last_interrupt_expired(agent, u64::MAX));
    }

    #[test]
    fn routine_job_interrupts_with_empty_queue() {
        let (colony, agent) = colony_with_colonist();
        let controller = enabled_controller(&colony, agent);
        let clean = colony.resolve("Clean");
        assert!(controller.should_interrupt(&colony, agent, clean, 0, 10));
        assert_eq!(
            controller.evaluate(&colony, agent, clean, 1, 10),
            InterruptDecision::Skip(SkipReason::QueueNotEmpty)
        );
    }

    #[test]
    fn idle_agent_interrupts() {
        let (colony, agent) = colony_with_colonist();
        let controller = enabled_controller(&colony, agent);
        assert!(controller.should_interrupt(&colony, agent, None, 0, 5));
    }

    #[test]
    fn disabled_agent_never_interrupts() {
        let (colony, agent) = colony_with_colonist();
        let controller = TacticsController::default();
        for job in [None, colony.resolve("Clean"), colony.resolve("Research")] {
            for queue_len in [0, 1, 3] {
                assert_eq!(
                    controller.evaluate(&colony, agent, job, queue_len, 500),
                    InterruptDecision::Skip(SkipReason::NotActive)
                );
            }
        }
    }

    #[test]
    fn first_window_is_not_reported_as_cooldown() {
        let (colony, agent) = colony_with_colonist();
        let controller = enabled_controller(&colony, agent);
        let research = colony.resolve("Research");

        assert_eq!(controller.phase(agent, 50), TacticsPhase::Armed);
        assert_eq!(
            controller.evaluate(&colony, agent, research, 0, 50),
            InterruptDecision::Skip(SkipReason::StartupWindow)
        );
        assert!(controller.should_interrupt(&colony, agent, research, 0, 91));
    }

    #[test]
    fn non_routine_job_waits_for_debounce() {
        let (mut colony, agent) = colony_with_colonist();
        let mut controller = enabled_controller(&colony, agent);
        let research = colony.resolve("Research");

        assert!(controller.trigger_interrupt(&mut colony, agent, 1_000));
        for tick in 1_001..=1_090 {
            assert_eq!(
                controller.evaluate(&colony, agent, research, 0, tick),
                InterruptDecision::Skip(SkipReason::CoolingDown),
                "tick {tick}"
            );
        }
        assert!(controller.should_interrupt(&colony, agent, research, 0, 1_091));
    }

    #[test]
    fn trigger_pauses_focuses_and_records() {
        let (mut colony, agent) = colony_with_colonist();
        let mut controller = enabled_controller(&colony, agent);
        assert!(controller.trigger_interrupt(&mut colony, agent, 42));
        assert!(colony.is_paused());
        assert_eq!(colony.focused(), Some(agent));
        assert_eq!(controller.last_interrupt_tick(agent), 42);

        let before = controller.state(agent);
        assert!(controller.trigger_interrupt(&mut colony, agent, 42));
        assert_eq!(controller.state(agent), before);
    }

    #[test]
    fn trigger_is_noop_when_inactive() {
        let (mut colony, agent) = colony_with_colonist();
        let mut controller = TacticsController::default();
        assert!(!controller.trigger_interrupt(&mut colony, agent, 42));
        assert!(!colony.is_paused());
        assert_eq!(colony.focused(), None);
        assert_eq!(controller.tracked_len(), 0);
    }

    #[test]
    fn phase_walks_through_state_machine() {
        let (mut colony, agent) = colony_with_colonist();
        let mut controller = TacticsController::default();
        assert_eq!(controller.phase(agent, 10), TacticsPhase::Disabled);

        controller.set_enabled(&colony, agent, true);
        assert_eq!(controller.phase(agent, 10), TacticsPhase::Armed);

        controller.trigger_interrupt(&mut colony, agent, 200);
        assert_eq!(controller.phase(agent, 200), TacticsPhase::Cooling);
        assert_eq!(controller.phase(agent, 290), TacticsPhase::Cooling);
        assert_eq!(controller.phase(agent, 291), TacticsPhase::Armed);

        controller.set_enabled(&colony, agent, false);
        assert_eq!(controller.phase(agent, 250), TacticsPhase::Disabled);
        controller.set_enabled(&colony, agent, true);
        assert_eq!(controller.phase(agent, 250), TacticsPhase::Cooling);
    }

    #[test]
    fn custom_debounce_window() {
        let (mut colony, agent) = colony_with_colonist();
        let mut controller = TacticsController::new(&EngineConfig { debounce_ticks: 10 });
        controller.set_enabled(&colony, agent, true);
        let research = colony.resolve("Research");
        controller.trigger_interrupt(&mut colony, agent, 100);
        assert!(!controller.should_interrupt(&colony, agent, research, 0, 110));
        assert!(controller.should_interrupt(&colony, agent, research, 0, 111));
        assert_eq!(controller.debounce_ticks(), 10);
    }

    #[test]
    fn whitelist_is_built_once() {
        let (mut colony, agent) = colony_with_colonist();
        let controller = enabled_controller(&colony, agent);
        let clean = colony.resolve("Clean").unwrap();
        assert!(controller.whitelist(&colony).is_routine(clean));

        // Later registry changes do not leak into the resolved set.
        colony.remove_job_def("Clean");
        assert!(controller.whitelist(&colony).is_routine(clean));
    }

    #[test]
    fn prebuilt_whitelist_is_used() {
        let (colony, agent) = colony_with_colonist();
        let controller = enabled_controller(&colony, agent)
            .with_whitelist(JobTypeWhitelist::from_names(&colony, &["Research"]));
        let research = colony.resolve("Research");
        let clean = colony.resolve("Clean");
        assert!(controller.should_interrupt(&colony, agent, research, 0, 5));
        assert!(!controller.should_interrupt(&colony, agent, clean, 0, 5));
    }

    #[test]
    fn job_cleanup_fires_and_reports() {
        let (mut colony, agent) = colony_with_colonist();
        let mut controller = enabled_controller(&colony, agent);
        colony.set_tick(300);
        let view = ActivitySnapshot {
            agent: Some(agent),
            current_job: colony.resolve("HaulToCell"),
            queue_len: 0,
            player_interruptible: true,
        };
        let outcome = controller.on_job_cleanup(&mut colony, &view).unwrap();
        assert_eq!(outcome, JobCleanupOutcome::Interrupted { agent, tick: 300 });
        assert_eq!(controller.last_interrupt_tick(agent), 300);
    }

    #[test]
    fn job_cleanup_respects_host_interruptible_flag() {
        let (mut colony, agent) = colony_with_colonist();
        let mut controller = enabled_controller(&colony, agent);
        let view = ActivitySnapshot {
            agent: Some(agent),
            current_job: None,
            queue_len: 0,
            player_interruptible: false,
        };
        let outcome = controller.on_job_cleanup(&mut colony, &view).unwrap();
        assert_eq!(
            outcome,
            JobCleanupOutcome::Skipped {
                agent,
                reason: SkipReason::NotInterruptible
            }
        );
        assert!(!colony.is_paused());
    }

    #[test]
    fn job_cleanup_without_agent_is_an_error() {
        let mut colony = SandboxColony::new();
        let mut controller = TacticsController::default();
        let view = ActivitySnapshot {
            agent: None,
            current_job: None,
            queue_len: 0,
            player_interruptible: true,
        };
        let result = controller.on_job_cleanup(&mut colony, &view);
        assert!(matches!(result, Err(TacticsError::MissingAgent)));
        assert!(!colony.is_paused());
    }

    #[test]
    fn purge_removes_only_destroyed() {
        let mut colony = SandboxColony::new();
        let alive = colony.spawn_colonist();
        let dead = colony.spawn_colonist();
        let mut controller = TacticsController::default();
        controller.set_enabled(&colony, alive, true);
        controller.set_enabled(&colony, dead, true);
        colony.destroy(dead);

        assert_eq!(controller.purge_destroyed(&colony), 1);
        assert_eq!(controller.tracked_agents().collect::<Vec<_>>(), vec![alive]);
        assert!(!controller.is_enabled_flag(dead));
        assert_eq!(controller.purge_destroyed(&colony), 0);
    }
}
