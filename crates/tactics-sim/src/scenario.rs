//! The `sandbox` section of `tactics-config.yaml`.

use serde::Deserialize;

use crate::error::SimError;

/// Parameters for the scripted colony.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScenarioConfig {
    /// Colonists to spawn, all with tactics mode on.
    #[serde(default = "default_colonists")]
    pub colonists: u32,

    /// Non-colonist agents to spawn.
    #[serde(default = "default_visitors")]
    pub visitors: u32,

    /// Ticks to run.
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    /// Seed for job scripting.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Job defs to leave out of the registry, simulating an older or newer
    /// host.
    #[serde(default = "default_missing_job_defs")]
    pub missing_job_defs: Vec<String>,

    /// Tick at which the first colonist is destroyed.
    #[serde(default = "default_casualty_tick")]
    pub casualty_tick: Option<u64>,

    /// Tick at which the tactics table is saved and loaded back.
    #[serde(default = "default_reload_tick")]
    pub reload_tick: Option<u64>,

    /// Shortest scripted job, in ticks.
    #[serde(default = "default_min_job_ticks")]
    pub min_job_ticks: u32,

    /// Longest scripted job, in ticks.
    #[serde(default = "default_max_job_ticks")]
    pub max_job_ticks: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            colonists: default_colonists(),
            visitors: default_visitors(),
            ticks: default_ticks(),
            seed: default_seed(),
            missing_job_defs: default_missing_job_defs(),
            casualty_tick: default_casualty_tick(),
            reload_tick: default_reload_tick(),
            min_job_ticks: default_min_job_ticks(),
            max_job_ticks: default_max_job_ticks(),
        }
    }
}

impl ScenarioConfig {
    /// Read the `sandbox` key out of a full config document. A missing key
    /// yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Scenario`] if the YAML or the section is invalid.
    pub fn from_yaml(contents: &str) -> Result<Self, SimError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: serde_yml::Value =
            serde_yml::from_str(contents).map_err(|e| SimError::Scenario {
                message: format!("failed to parse config YAML: {e}"),
            })?;
        let config = match raw.get("sandbox") {
            Some(section) => {
                serde_yml::from_value(section.clone()).map_err(|e| SimError::Scenario {
                    message: format!("failed to parse sandbox config: {e}"),
                })?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Scenario`] if the job duration range is empty.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.min_job_ticks == 0 || self.min_job_ticks > self.max_job_ticks {
            return Err(SimError::Scenario {
                message: format!(
                    "job ticks must satisfy 1 <= min ({}) <= max ({})",
                    self.min_job_ticks, self.max_job_ticks
                ),
            });
        }
        Ok(())
    }
}

const fn default_colonists() -> u32 {
    4
}

const fn default_visitors() -> u32 {
    2
}

const fn default_ticks() -> u64 {
    3_000
}

const fn default_seed() -> u64 {
    42
}

fn default_missing_job_defs() -> Vec<String> {
    vec!["TriggerFirefoamPopper".to_owned(), "UseArtifact".to_owned()]
}

#[allow(clippy::unnecessary_wraps)]
const fn default_casualty_tick() -> Option<u64> {
    Some(1_500)
}

#[allow(clippy::unnecessary_wraps)]
const fn default_reload_tick() -> Option<u64> {
    Some(2_000)
}

const fn default_min_job_ticks() -> u32 {
    20
}

const fn default_max_job_ticks() -> u32 {
    120
}
