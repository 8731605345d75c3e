//! Shared type definitions for the Tactics Mode decision engine.
//!
//! Types defined here are consumed by the core engine and by host
//! integrations. They flow to `TypeScript` via `ts-rs` for UI overlays.
//!
//! # Modules
//!
//! - [`ids`] -- Agent and job-definition identifiers
//! - [`enums`] -- Derived tactics phase and skip reasons
//! - [`structs`] -- Save-data shape and the toggle command descriptor

pub mod enums;
pub mod ids;
pub mod structs;

pub use enums::{SkipReason, TacticsPhase};
pub use ids::{AgentId, JobDefId};
pub use structs::{TacticsSaveData, ToggleCommand};

#[cfg(test)]
mod tests {
    //! Binding generation for the UI layer.

    #[test]
    fn export_bindings() {
        use ts_rs::TS;

        let _ = crate::ids::AgentId::export_all();
        let _ = crate::ids::JobDefId::export_all();
        let _ = crate::enums::TacticsPhase::export_all();
        let _ = crate::enums::SkipReason::export_all();
        let _ = crate::structs::TacticsSaveData::export_all();
        let _ = crate::structs::ToggleCommand::export_all();
    }
}
