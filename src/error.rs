use thiserror::Error;

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, GraspError>;

/// Errors that can abort a GRASP run.
///
/// None of them is recoverable from within a run: configuration problems are detected before any
/// clustering work starts, and consistency errors indicate a broken invariant.
#[derive(Debug, Error)]
pub enum GraspError {
    /// Cluster count, threshold or restart count outside of their valid domain.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Malformed point data. **line** is 1-based, or 0 when the problem is not tied to a line.
    #[error("malformed dataset (line {line}): {message}")]
    DataFormat { line: u64, message: String },

    /// A cluster became empty, or a centroid was requested for an empty cluster.
    #[error("internal consistency violated: {0}")]
    InternalConsistency(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl GraspError {
    pub(crate) fn data_format(line: u64, message: impl Into<String>) -> Self {
        GraspError::DataFormat { line, message: message.into() }
    }
}
