//! Error types for the sandbox harness binary.

/// Top-level error for the harness.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: tactics_core::ConfigError,
    },

    /// The `sandbox` config section is unusable.
    #[error("sandbox config error: {message}")]
    Scenario {
        /// Description of the problem.
        message: String,
    },

    /// Restoring the tactics table from save data failed.
    #[error("restore error: {source}")]
    Restore {
        /// The underlying tactics error.
        #[from]
        source: tactics_core::TacticsError,
    },

    /// Save data could not be encoded or decoded.
    #[error("save data JSON error: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
