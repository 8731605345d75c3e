//! Entry point for host event dispatch.
//!
//! Host integrations call [`handle_job_cleanup`] from whatever mechanism
//! they use to observe "current job about to be cleared" (an event
//! subscription, a virtual override, a patch). It never propagates errors:
//! an integration fault is logged and the interrupt is skipped for that one
//! event, so the game keeps running.

use tracing::error;

use crate::controller::{JobCleanupOutcome, TacticsController};
use crate::host::{AgentActivityView, TacticsHost};

/// Result of one dispatched job-cleanup event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// The controller ran; see the inner outcome.
    Completed(JobCleanupOutcome),
    /// The host integration could not supply what the controller needs.
    Faulted,
}

impl HookOutcome {
    /// Whether an interrupt fired.
    pub const fn interrupted(self) -> bool {
        matches!(
            self,
            Self::Completed(JobCleanupOutcome::Interrupted { .. })
        )
    }
}

/// Run the controller for a job-cleanup event, logging integration faults.
pub fn handle_job_cleanup<H>(
    controller: &mut TacticsController,
    host: &mut H,
    view: &(impl AgentActivityView + ?Sized),
) -> HookOutcome
where
    H: TacticsHost + ?Sized,
{
    match controller.on_job_cleanup(host, view) {
        Ok(outcome) => HookOutcome::Completed(outcome),
        Err(err) => {
            error!(
                %err,
                tick = host.current_tick(),
                "Tactics hook fault in host integration, skipping interrupt"
            );
            HookOutcome::Faulted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ActivitySnapshot, JobDefRegistry};
    use crate::sandbox::SandboxColony;

    #[test]
    fn fault_is_contained() {
        let mut colony = SandboxColony::new();
        let mut controller = TacticsController::default();
        let view = ActivitySnapshot {
            agent: None,
            current_job: None,
            queue_len: 0,
            player_interruptible: true,
        };
        let outcome = handle_job_cleanup(&mut controller, &mut colony, &view);
        assert_eq!(outcome, HookOutcome::Faulted);
        assert!(!outcome.interrupted());
        assert!(!colony.is_paused());
    }

    #[test]
    fn dispatch_through_trait_object() {
        let mut colony = SandboxColony::new();
        let agent = colony.spawn_colonist();
        let mut controller = TacticsController::default();
        controller.set_enabled(&colony, agent, true);
        let view = ActivitySnapshot {
            agent: Some(agent),
            current_job: colony.resolve("Sow"),
            queue_len: 0,
            player_interruptible: true,
        };

        let host: &mut dyn TacticsHost = &mut colony;
        let outcome = handle_job_cleanup(&mut controller, host, &view);
        assert!(outcome.interrupted());
        assert!(colony.is_paused());
    }
}
