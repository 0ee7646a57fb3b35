//! Error types for the bit-string experiment.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from parsing digits, reshaping, or loading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BitsError {
    /// A character outside `'0'..='9'` in a digit string.
    #[error("invalid digit '{ch}' at position {position}")]
    InvalidDigit { ch: char, position: usize },

    /// The requested shape does not hold the array's elements.
    #[error("cannot reshape array of size {len} into shape ({rows}, {cols})")]
    Shape { len: usize, rows: usize, cols: usize },

    /// Malformed YAML configuration.
    #[error("invalid experiment config: {0}")]
    Config(#[from] serde_yaml_ng::Error),

    /// Configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for bit-string operations.
pub type BitsResult<T> = Result<T, BitsError>;
