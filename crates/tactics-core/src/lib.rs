//! Tactics Mode decision engine.
//!
//! When tactics mode is on for a colonist, the simulation pauses and the
//! camera centers on them as they finish routine work, so the player can
//! give the next order. This crate decides when that happens. The host
//! simulation supplies agents, job types, the clock and the camera through
//! the traits in [`host`].
//!
//! Everything here runs synchronously on the host's update loop.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `tactics-config.yaml`.
//! - [`controller`] -- [`TacticsController`]: per-agent state, the interrupt
//!   decision, and the job-cleanup entry point.
//! - [`error`] -- [`TacticsError`].
//! - [`gizmo`] -- Toggle button descriptor for the host UI.
//! - [`hook`] -- Fault-containing wrapper for host event dispatch.
//! - [`host`] -- Host capability traits.
//! - [`persist`] -- Save-data export and restore.
//! - [`sandbox`] -- In-memory host for tests and demos.
//! - [`whitelist`] -- [`JobTypeWhitelist`] of routine job types.

pub mod config;
pub mod controller;
pub mod error;
pub mod gizmo;
pub mod hook;
pub mod host;
pub mod persist;
pub mod sandbox;
pub mod whitelist;

pub use config::{ConfigError, TacticsConfig};
pub use controller::{InterruptDecision, JobCleanupOutcome, TacticsController, TacticsState};
pub use error::TacticsError;
pub use gizmo::toggle_command;
pub use hook::{HookOutcome, handle_job_cleanup};
pub use host::{
    ActivitySnapshot, AgentActivityView, JobDefRegistry, PawnRoster, SupervisorControls,
    TacticsHost,
};
pub use sandbox::SandboxColony;
pub use whitelist::{JOB_TYPE_WHITELIST_NAMES, JobTypeWhitelist};
