use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, solving or writing a dataset.
#[derive(Debug, Error)]
pub(crate) enum StallsError {
    /// A line of the input file does not follow the judge format.
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    /// A query outside `1 <= customers <= stalls`.
    #[error("invalid query (stalls = {stalls}, customers = {customers}): {reason}")]
    InvalidQuery {
        stalls: u64,
        customers: u64,
        reason: &'static str,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StallsError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        StallsError::MalformedInput {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StallsError::Io {
            path: path.into(),
            source,
        }
    }
}

pub(crate) type Result<T> = std::result::Result<T, StallsError>;
