use thiserror::Error;

/// Library-level error type.
///
/// Optimization itself is infallible: malformed IR nodes degrade to
/// undercounting, a missing config file falls back to defaults, and solver
/// exhaustion is reported through the `adjusted` flag. Only configuration
/// persistence can fail hard.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
