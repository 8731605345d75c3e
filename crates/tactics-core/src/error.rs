//! Error types for the `tactics-core` crate.
//!
//! Most misuse is recovered locally and only logged. The variants here are
//! the conditions a caller has to see.

/// Errors returned by tactics operations.
#[derive(Debug, thiserror::Error)]
pub enum TacticsError {
    /// The host could not supply the agent behind a job tracker. This is a
    /// fault in the host integration; the interrupt is skipped for this
    /// event only.
    #[error("job tracker has no backing agent")]
    MissingAgent,

    /// Save data with agent and flag sequences of different lengths.
    #[error("save data mismatch: {agents} agents but {flags} flags")]
    SaveDataMismatch {
        /// Length of the agent sequence.
        agents: usize,
        /// Length of the flag sequence.
        flags: usize,
    },
}
