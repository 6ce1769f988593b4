use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the library layer.
#[derive(Error, Debug)]
pub enum SpeclibError {
    /// The input file is missing, unreadable or not valid delimited text.
    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// A requested sample row is outside the table.
    #[error("sample index {index} out of range for table with {n_samples} rows")]
    Index { index: usize, n_samples: usize },

    #[error("rendering error: {0}")]
    Render(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl SpeclibError {
    pub(crate) fn parse(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        SpeclibError::Parse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for library operations.
pub type Result<T> = std::result::Result<T, SpeclibError>;
