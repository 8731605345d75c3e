//! Routine job types that are safe to interrupt.
//!
//! The whitelist is declared as a static list of job def names and resolved
//! against the host's [`JobDefRegistry`] once. Names this host version does
//! not define are logged and dropped, so the resolved set is always a subset
//! of [`JOB_TYPE_WHITELIST_NAMES`].

use std::collections::BTreeSet;

use tactics_types::JobDefId;
use tracing::{debug, warn};

use crate::host::JobDefRegistry;

/// Job def names considered low-stakes and safely resumable without review:
/// movement, hauling, cleaning, crafting support, medical support, resource
/// extraction, prisoner and animal handling, equipment maintenance.
///
/// `TriggerFirefoamPopper` and `UseArtifact` are gone from newer hosts and
/// resolve to nothing there.
pub const JOB_TYPE_WHITELIST_NAMES: &[&str] = &[
    "Arrest",
    "BuildRoof",
    "Capture",
    "CarryToCryptosleepCasket",
    "Clean",
    "CutPlant",
    "CutPlantDesignated",
    "Deconstruct",
    "DeliverFood",
    "DoBill",
    "DropEquipment",
    "EnterCryptosleepCasket",
    "EnterTransporter",
    "Equip",
    "EscortPrisonerToBed",
    "ExtinguishSelf",
    "FeedPatient",
    "FillFermentingBarrel",
    "FinishFrame",
    "FixBrokenDownBuilding",
    "Flick",
    "Goto",
    "Harvest",
    "HarvestDesignated",
    "HaulCorpseToPublicPlace",
    "HaulToCell",
    "HaulToContainer",
    "HaulToTransporter",
    "Hunt",
    "Ingest",
    "Maintain",
    "ManTurret",
    "Mine",
    "Open",
    "OperateDeepDrill",
    "PlaceNoCostFrame",
    "OperateScanner",
    "PrisonerExecution",
    "RearmTurret",
    "RearmTurretAtomic",
    "Refuel",
    "RefuelAtomic",
    "ReleasePrisoner",
    "RemoveApparel",
    "RemoveFloor",
    "RemoveRoof",
    "Repair",
    "Rescue",
    "Shear",
    "Slaughter",
    "SmoothFloor",
    "SmoothWall",
    "Sow",
    "Strip",
    "TakeBeerOutOfFermentingBarrel",
    "TakeInventory",
    "TakeToBedToOperate",
    "TakeWoundedPrisonerToBed",
    "Tame",
    "TendPatient",
    "TradeWithPawn",
    "Train",
    "TriggerFirefoamPopper",
    "Uninstall",
    "UseArtifact",
    "UseNeurotrainer",
    "VisitSickPawn",
    "Wear",
];

/// Resolved set of routine job types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobTypeWhitelist {
    routine: BTreeSet<JobDefId>,
}

impl JobTypeWhitelist {
    /// Resolve [`JOB_TYPE_WHITELIST_NAMES`] against the registry.
    pub fn build(registry: &(impl JobDefRegistry + ?Sized)) -> Self {
        Self::from_names(registry, JOB_TYPE_WHITELIST_NAMES)
    }

    /// Resolve an arbitrary name list. Unknown names are logged and skipped.
    pub fn from_names(registry: &(impl JobDefRegistry + ?Sized), names: &[&str]) -> Self {
        let mut routine = BTreeSet::new();
        for &name in names {
            match registry.resolve(name) {
                Some(def) => {
                    routine.insert(def);
                }
                None => warn!(def_name = name, "Cannot resolve whitelisted job def, skipping"),
            }
        }
        debug!(
            resolved = routine.len(),
            declared = names.len(),
            "Job type whitelist built"
        );
        Self { routine }
    }

    /// Whether the job type is routine.
    pub fn is_routine(&self, job: JobDefId) -> bool {
        self.routine.contains(&job)
    }

    /// Number of resolved job types.
    pub fn len(&self) -> usize {
        self.routine.len()
    }

    /// Whether nothing resolved.
    pub fn is_empty(&self) -> bool {
        self.routine.is_empty()
    }

    /// Resolved job types in handle order.
    pub fn iter(&self) -> impl Iterator<Item = JobDefId> + '_ {
        self.routine.iter().copied()
    }
}
