// Error taxonomy for the comparison pipeline
//
// Shape errors are raised before any statistics run. Numeric errors abort the
// whole run on the first failing test.

use std::fmt;
use thiserror::Error;

use super::descriptive::StatsError;

/// Which of the two measurement sets a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunSet {
    Before,
    After,
}

impl fmt::Display for RunSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunSet::Before => write!(f, "before"),
            RunSet::After => write!(f, "after"),
        }
    }
}

/// Errors that abort a comparison run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComparisonError {
    #[error("before/after column count mismatch: before has {before}, after has {after}")]
    ColumnCountMismatch { before: usize, after: usize },

    #[error("{labels} test labels given for {columns} data columns")]
    LabelCountMismatch { labels: usize, columns: usize },

    #[error("test '{label}' has no measurements in the {set} set")]
    EmptySample { label: String, set: RunSet },

    #[error("test '{label}' ({set} set): {source}")]
    Statistics {
        label: String,
        set: RunSet,
        #[source]
        source: StatsError,
    },

    #[error("test '{label}': {set} mean is zero, percentage change is undefined")]
    ZeroBaselineMean { label: String, set: RunSet },
}

impl ComparisonError {
    /// True for errors detected before any statistic was computed
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            ComparisonError::ColumnCountMismatch { .. }
                | ComparisonError::LabelCountMismatch { .. }
                | ComparisonError::EmptySample { .. }
        )
    }
}

/// Result type for comparison operations
pub type Result<T> = std::result::Result<T, ComparisonError>;
