use thiserror::Error;

/// Errors surfaced at construction or configuration time.
/// Per-tick work under a validated configuration does not fail.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A structural setting is unusable (empty index boundary, zero capacity, bad config value).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A runtime request carried an out-of-range value (negative viewport size, bad pool range).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The JSON settings document could not be parsed.
    #[error("failed to parse settings: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
