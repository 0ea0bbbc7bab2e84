use thiserror::Error;

/// Errors raised before a table is reconciled
///
/// A table that fails these checks is never partially mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconError {
    #[error("Table has no header row")]
    NoHeader,

    #[error("Table has {found} columns, need at least {required} ({identifiers} identifier columns plus one period)")]
    TooFewColumns {
        found: usize,
        required: usize,
        identifiers: usize,
    },

    #[error("Table is not rectangular: row {row} has {actual} cells, header has {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl ReconError {
    /// Whether the error is about the table's shape rather than the options
    #[must_use]
    pub fn is_shape(&self) -> bool {
        !matches!(self, ReconError::InvalidOptions(_))
    }
}

pub type Result<T> = std::result::Result<T, ReconError>;
