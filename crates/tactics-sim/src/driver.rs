//! Scripted job loop over a [`SandboxColony`].
//!
//! Every living agent works through randomly chosen jobs of random length.
//! When a job ends, the driver dispatches the job-cleanup event to the
//! tactics hook exactly like a host integration would. While the clock is
//! paused, a stand-in supervisor hands the focused colonist a short queue of
//! orders and resumes.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tactics_core::{
    ActivitySnapshot, HookOutcome, JobCleanupOutcome, JobDefRegistry, SandboxColony,
    TacticsController, TacticsHost, handle_job_cleanup, toggle_command,
};
use tactics_types::{AgentId, JobDefId, TacticsSaveData};
use tracing::{debug, info};

use crate::error::SimError;
use crate::scenario::ScenarioConfig;

/// Chance that a finishing job is not player-interruptible.
const UNINTERRUPTIBLE_CHANCE: f64 = 0.05;

/// Chance that an agent idles instead of picking a new job.
const IDLE_CHANCE: f64 = 0.1;

/// Orders the supervisor queues after an interrupt.
const SUPERVISOR_QUEUE_LEN: usize = 2;

/// Per-agent scripted work.
#[derive(Debug, Clone, Copy)]
struct Work {
    job: Option<JobDefId>,
    remaining: u32,
    queued: usize,
}

/// Tallies for one run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Ticks the clock advanced.
    pub ticks: u64,
    /// Job-cleanup events dispatched.
    pub events: u64,
    /// Interrupts that paused the clock.
    pub interrupts: u64,
    /// Skipped events, by reason.
    pub skipped: BTreeMap<String, u64>,
    /// Events the hook reported as integration faults.
    pub faults: u64,
    /// Save-and-load cycles performed.
    pub reloads: u64,
    /// Table as it would be saved at the end of the run.
    pub final_save: TacticsSaveData,
}

/// A sandbox colony with scripted agents.
#[derive(Debug)]
pub struct ScriptedColony {
    colony: SandboxColony,
    work: BTreeMap<AgentId, Work>,
    colonists: Vec<AgentId>,
    jobs: Vec<JobDefId>,
    rng: StdRng,
    config: ScenarioConfig,
}

impl ScriptedColony {
    /// Build the colony: registry skew, colonists, visitors.
    pub fn new(config: &ScenarioConfig) -> Self {
        let mut colony = SandboxColony::new();
        for name in &config.missing_job_defs {
            if colony.remove_job_def(name).is_none() {
                debug!(def_name = name.as_str(), "Job def already absent from sandbox");
            }
        }
        let jobs = colony
            .job_def_names()
            .filter_map(|name| colony.resolve(name))
            .collect();

        let colonists: Vec<AgentId> = (0..config.colonists)
            .map(|_| colony.spawn_colonist())
            .collect();
        for _ in 0..config.visitors {
            colony.spawn_visitor();
        }

        let work = colony
            .living_agents()
            .map(|agent| {
                (
                    agent,
                    Work {
                        job: None,
                        remaining: 1,
                        queued: 0,
                    },
                )
            })
            .collect();

        Self {
            colony,
            work,
            colonists,
            jobs,
            rng: StdRng::seed_from_u64(config.seed),
            config: config.clone(),
        }
    }

    /// The underlying host.
    pub const fn colony(&self) -> &SandboxColony {
        &self.colony
    }

    /// Turn tactics mode on for every colonist, and (harmlessly) for the
    /// first visitor to show the misuse warning.
    pub fn enable_tactics(&self, controller: &mut TacticsController) {
        let mut visitor_flagged = false;
        for agent in self.colony.living_agents() {
            match toggle_command(controller, &self.colony, agent) {
                Some(command) if !command.is_active => {
                    controller.toggle(&self.colony, agent);
                }
                Some(_) => {}
                None if !visitor_flagged && !self.colonists.contains(&agent) => {
                    controller.set_enabled(&self.colony, agent, true);
                    visitor_flagged = true;
                }
                None => {}
            }
        }
        info!(tracked = controller.tracked_len(), "Tactics mode enabled");
    }

    /// Run the configured number of ticks.
    ///
    /// # Errors
    ///
    /// Returns [`SimError`] if the mid-run save and load fails.
    pub fn run(&mut self, controller: &mut TacticsController) -> Result<RunSummary, SimError> {
        let mut summary = RunSummary::default();

        while summary.ticks < self.config.ticks {
            if self.colony.is_paused() {
                self.supervise();
            }

            let tick = self.colony.advance();
            summary.ticks = summary.ticks.saturating_add(1);

            if self.config.casualty_tick == Some(tick) {
                self.casualty();
            }
            if self.config.reload_tick == Some(tick) {
                self.reload(controller)?;
                summary.reloads = summary.reloads.saturating_add(1);
            }

            self.step_agents(controller, &mut summary);
        }

        summary.final_save = controller.prepare_save(&self.colony);
        Ok(summary)
    }

    /// Advance every agent's job by one tick, dispatching cleanup events.
    /// Stops early once an interrupt pauses the clock.
    fn step_agents(&mut self, controller: &mut TacticsController, summary: &mut RunSummary) {
        let agents: Vec<AgentId> = self.colony.living_agents().collect();
        for agent in agents {
            let Some(work) = self.work.get(&agent).copied() else {
                continue;
            };
            let remaining = work.remaining.saturating_sub(1);
            if remaining > 0 {
                self.work.insert(agent, Work { remaining, ..work });
                continue;
            }

            let view = ActivitySnapshot {
                agent: Some(agent),
                current_job: work.job,
                queue_len: work.queued,
                player_interruptible: !self.rng.random_bool(UNINTERRUPTIBLE_CHANCE),
            };
            let outcome = handle_job_cleanup(controller, &mut self.colony, &view);
            record(summary, outcome);

            let next = self.next_work(work.queued.saturating_sub(1));
            self.work.insert(agent, next);

            if self.colony.is_paused() {
                break;
            }
        }
    }

    /// Pick the next scripted job.
    fn next_work(&mut self, queued: usize) -> Work {
        let job = if queued == 0 && self.rng.random_bool(IDLE_CHANCE) {
            None
        } else {
            let idx = self.rng.random_range(0..self.jobs.len().max(1));
            self.jobs.get(idx).copied()
        };
        Work {
            job,
            remaining: self
                .rng
                .random_range(self.config.min_job_ticks..=self.config.max_job_ticks),
            queued,
        }
    }

    /// Stand-in for the player: queue orders for the focused colonist, then
    /// unpause.
    fn supervise(&mut self) {
        if let Some(agent) = self.colony.focused() {
            let mut orders = self.next_work(SUPERVISOR_QUEUE_LEN);
            orders.job = self.jobs.first().copied();
            self.work.insert(agent, orders);
            debug!(agent = %agent, tick = self.colony.current_tick(), "Supervisor issued orders");
        }
        self.colony.resume();
    }

    /// Destroy the first living colonist.
    fn casualty(&mut self) {
        let victim = self
            .colonists
            .iter()
            .copied()
            .find(|&agent| self.colony.living_agents().any(|living| living == agent));
        if let Some(agent) = victim {
            self.colony.destroy(agent);
            self.work.remove(&agent);
            info!(agent = %agent, tick = self.colony.current_tick(), "Colonist destroyed");
        }
    }

    /// Save the tactics table to JSON and load it into a fresh controller.
    fn reload(&self, controller: &mut TacticsController) -> Result<(), SimError> {
        let json = serde_json::to_string(&controller.prepare_save(&self.colony))?;
        let data: TacticsSaveData = serde_json::from_str(&json)?;
        let mut fresh = TacticsController::with_debounce(controller.debounce_ticks());
        fresh.restore(&data)?;
        *controller = fresh;
        info!(
            tick = self.colony.current_tick(),
            entries = data.agents.len(),
            bytes = json.len(),
            "Tactics table saved and reloaded"
        );
        Ok(())
    }
}

fn record(summary: &mut RunSummary, outcome: HookOutcome) {
    summary.events = summary.events.saturating_add(1);
    match outcome {
        HookOutcome::Completed(JobCleanupOutcome::Interrupted { .. }) => {
            summary.interrupts = summary.interrupts.saturating_add(1);
        }
        HookOutcome::Completed(JobCleanupOutcome::Skipped { reason, .. }) => {
            let count = summary.skipped.entry(reason.to_string()).or_insert(0);
            *count = count.saturating_add(1);
        }
        HookOutcome::Faulted => {
            summary.faults = summary.faults.saturating_add(1);
        }
    }
}
