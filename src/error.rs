//! Error types for timeprint
//!
//! Timing itself never fails; errors only come from misuse of the activation
//! entry point or from loading configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeprintError {
    /// The activation entry point accepts zero or one argument. `count` is
    /// known only when the arguments came from a sized iterator.
    #[error(
        "timeprint accepts at most one argument, got {}",
        count.map_or_else(|| "more".to_string(), |n| n.to_string())
    )]
    InvalidActivation { count: Option<usize> },

    #[error("invalid timeprint configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to read timeprint configuration: {0}")]
    Io(#[from] std::io::Error),
}
