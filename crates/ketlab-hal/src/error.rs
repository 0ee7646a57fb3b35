//! Backend errors.

use thiserror::Error;

/// Everything a backend call can fail with.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    #[error("Invalid backend configuration: {0}")]
    Configuration(String),

    /// The circuit failed [`Backend::validate`](crate::Backend::validate).
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Job failed: {0}")]
    JobFailed(String),

    #[error("Job cancelled")]
    JobCancelled,

    #[error("Timeout waiting for job {0}")]
    Timeout(String),

    /// A result was asked for data the job did not produce, e.g. a statevector
    /// from a circuit without a save directive.
    #[error("Result has no {0}")]
    MissingData(String),

    #[error("Invalid statevector: {0}")]
    InvalidStatevector(String),
}

pub type HalResult<T> = Result<T, HalError>;
