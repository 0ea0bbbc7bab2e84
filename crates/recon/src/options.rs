use crate::error::{ReconError, Result};
use serde::{Deserialize, Serialize};

/// Header text given to a column that has values but no date.
pub const DEFAULT_SENTINEL_LABEL: &str = "забор";

/// Number of leading identifier columns that are never reconciled.
pub const DEFAULT_IDENTIFIER_COLUMNS: usize = 3;

/// How the first period column treats the identifier column on its left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstPeriod {
    /// Compare against the last identifier column like any other neighbour
    #[default]
    CompareWithIdentifier,
    /// The first period column has no left neighbour: carry-forward is skipped
    NoLeftNeighbor,
}

/// How two neighbouring cells are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Raw text, markers included
    #[default]
    Raw,
    /// Text before the first marker on both sides
    Semantic,
}

/// Knobs for a reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileOptions {
    pub identifier_columns: usize,
    pub sentinel_label: String,
    pub first_period: FirstPeriod,
    pub comparison: Comparison,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        ReconcileOptions {
            identifier_columns: DEFAULT_IDENTIFIER_COLUMNS,
            sentinel_label: DEFAULT_SENTINEL_LABEL.to_string(),
            first_period: FirstPeriod::default(),
            comparison: Comparison::default(),
        }
    }
}

impl ReconcileOptions {
    /// Set the sentinel label
    #[must_use]
    pub fn with_sentinel_label(mut self, label: &str) -> Self {
        self.sentinel_label = label.to_string();
        self
    }

    /// Set the first-period policy
    #[must_use]
    pub fn with_first_period(mut self, first_period: FirstPeriod) -> Self {
        self.first_period = first_period;
        self
    }

    /// Set the comparison mode
    #[must_use]
    pub fn with_comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = comparison;
        self
    }

    /// Set the number of identifier columns
    #[must_use]
    pub fn with_identifier_columns(mut self, identifier_columns: usize) -> Self {
        self.identifier_columns = identifier_columns;
        self
    }

    /// Check the options make sense on their own
    pub fn validate(&self) -> Result<()> {
        if self.identifier_columns == 0 {
            return Err(ReconError::InvalidOptions(
                "identifier_columns must be at least 1".to_string(),
            ));
        }
        if self.sentinel_label.is_empty() {
            return Err(ReconError::InvalidOptions(
                "sentinel_label must not be empty".to_string(),
            ));
        }
        if self.sentinel_label.contains(carryover_sheet::MARKER) {
            return Err(ReconError::InvalidOptions(format!(
                "sentinel_label must not contain '{}'",
                carryover_sheet::MARKER
            )));
        }
        Ok(())
    }
}
