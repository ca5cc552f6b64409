use thiserror::Error;

/// Error type that captures window validation and persistence failures.
///
/// Projection itself never errors: malformed recurrence data contributes
/// zero so a display layer keeps rendering partially-invalid datasets.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid window: {0}")]
    InvalidWindow(String),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
}
