//! Sandbox harness for the Tactics Mode engine.
//!
//! Drives a scripted colony tick by tick through the same job-cleanup hook
//! a game integration would call, then prints the final save data.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `tactics-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the sandbox colony from the `sandbox` section
//! 4. Create the tactics controller and enable it for every colonist
//! 5. Run the scripted job loop
//! 6. Log the summary and print the save data as JSON

mod driver;
mod error;
mod scenario;

use std::path::Path;

use tactics_core::config::LoggingConfig;
use tactics_core::{ConfigError, JobTypeWhitelist, TacticsConfig, TacticsController};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::driver::ScriptedColony;
use crate::error::SimError;
use crate::scenario::ScenarioConfig;

/// Config file looked up in the working directory.
const CONFIG_PATH: &str = "tactics-config.yaml";

/// Application entry point for the sandbox harness.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the run fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, scenario) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        debounce_ticks = config.tactics.debounce_ticks,
        colonists = scenario.colonists,
        visitors = scenario.visitors,
        ticks = scenario.ticks,
        seed = scenario.seed,
        "tactics-sim starting"
    );

    // 3. Build the sandbox colony.
    let mut colony = ScriptedColony::new(&scenario);
    info!(
        missing_job_defs = scenario.missing_job_defs.len(),
        agents = colony.colony().living_agents().count(),
        "Sandbox colony created"
    );

    // 4. Create the controller with the whitelist resolved against this
    //    colony's registry.
    let whitelist = JobTypeWhitelist::build(colony.colony());
    let mut controller = TacticsController::new(&config.tactics).with_whitelist(whitelist);
    colony.enable_tactics(&mut controller);

    // 5. Run.
    let summary = colony.run(&mut controller)?;

    // 6. Report.
    info!(
        ticks = summary.ticks,
        events = summary.events,
        interrupts = summary.interrupts,
        faults = summary.faults,
        reloads = summary.reloads,
        skipped = ?summary.skipped,
        "Run complete"
    );
    let json = serde_json::to_string_pretty(&summary.final_save).map_err(SimError::from)?;
    println!("{json}");

    Ok(())
}

/// Install the `tracing` subscriber. `RUST_LOG` overrides the configured
/// level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Load engine and sandbox configuration from [`CONFIG_PATH`].
///
/// If the file does not exist, defaults are used for both.
fn load_config() -> Result<(TacticsConfig, ScenarioConfig), SimError> {
    let config_path = Path::new(CONFIG_PATH);
    if !config_path.exists() {
        return Ok((TacticsConfig::default(), ScenarioConfig::default()));
    }
    let contents = std::fs::read_to_string(config_path).map_err(ConfigError::from)?;
    let config = TacticsConfig::parse(&contents)?;
    let scenario = ScenarioConfig::from_yaml(&contents)?;
    Ok((config, scenario))
}
