use std::io;
use thiserror::Error;

/// Possible errors that arise from bad input points, malformed dissimilarity matrices or
/// unsupported linkage configurations.
#[derive(Debug, Error)]
pub enum LinkageError {
    /// A point has a non-finite coordinate, or a coordinate out of range for the metric.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Fewer than two observations were given, so no merge is possible.
    #[error("At least 2 observations are required for clustering, but {0} were given")]
    InsufficientData(usize),
    /// The condensed matrix length does not correspond to any number of observations.
    #[error("Malformed condensed matrix: {0}")]
    MalformedMatrix(String),
    /// The linkage criterion name is unknown, or the criterion can't be used with the
    /// selected algorithm.
    #[error("Unsupported linkage criterion: {0}")]
    UnsupportedCriterion(String),
    /// The condensed matrix for this many observations could not be allocated.
    #[error("Unable to allocate a condensed matrix for {0} observations")]
    Allocation(usize),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
