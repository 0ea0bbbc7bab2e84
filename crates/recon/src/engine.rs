use carryover_sheet::{column_index_to_letters, mark, strip_marker, MARKER};
use serde::Serialize;

use crate::classify::{classify_column, ColumnKind};
use crate::error::{ReconError, Result};
use crate::options::{Comparison, FirstPeriod, ReconcileOptions};

/// Rows of text cells; row 0 is the header.
pub type Table = Vec<Vec<String>>;

/// What happened to one period column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnReport {
    /// 0-based column index
    pub index: usize,
    /// Column letters, e.g. "D"
    pub letter: String,
    pub kind: ColumnKind,
    /// Cells filled from the left neighbour
    pub filled: usize,
    /// Cells marked as changed
    pub flagged: usize,
}

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    /// Columns visited, left to right, including the one that stopped the scan
    pub columns: Vec<ColumnReport>,
    /// Index of the empty column that ended the scan, if any
    pub stopped_at: Option<usize>,
}

impl ReconcileSummary {
    /// Total forward-filled cells
    #[must_use]
    pub fn filled(&self) -> usize {
        self.columns.iter().map(|c| c.filled).sum()
    }

    /// Total cells marked as changed (headers included)
    #[must_use]
    pub fn flagged(&self) -> usize {
        self.columns.iter().map(|c| c.flagged).sum()
    }

    /// Number of visited columns of a kind
    #[must_use]
    pub fn count(&self, kind: ColumnKind) -> usize {
        self.columns.iter().filter(|c| c.kind == kind).count()
    }
}

/// A reconciled table with its summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub table: Table,
    pub summary: ReconcileSummary,
}

/// Carries period values forward and flags the ones that changed
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    options: ReconcileOptions,
}

impl Reconciler {
    /// Create a reconciler with the given options
    #[must_use]
    pub fn new(options: ReconcileOptions) -> Self {
        Reconciler { options }
    }

    /// Get the options
    #[must_use]
    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Reconcile an owned table and hand it back annotated
    pub fn reconcile(&self, mut table: Table) -> Result<Reconciled> {
        let summary = self.reconcile_in_place(&mut table)?;
        Ok(Reconciled { table, summary })
    }

    /// Reconcile a table in place, scanning period columns left to right.
    ///
    /// The table is checked before anything is touched; on error it is
    /// returned to the caller unchanged.
    pub fn reconcile_in_place(&self, table: &mut Table) -> Result<ReconcileSummary> {
        self.options.validate()?;
        let width = self.check_shape(table)?;
        let first = self.options.identifier_columns;
        let mut summary = ReconcileSummary::default();

        for col in first..width {
            let kind = classify_column(table, col);
            let mut report = ColumnReport {
                index: col,
                letter: column_index_to_letters(col),
                kind,
                filled: 0,
                flagged: 0,
            };

            match kind {
                ColumnKind::Complete => {}
                ColumnKind::Partial => {
                    if col == first && self.options.first_period == FirstPeriod::NoLeftNeighbor {
                        tracing::debug!(column = %report.letter, "first period has no left neighbour, skipping carry-forward");
                    } else {
                        self.carry_forward(table, col, &mut report);
                    }
                }
                ColumnKind::Unlabeled => self.open_new_period(table, col, &mut report),
                ColumnKind::Empty => {
                    tracing::debug!(column = %report.letter, "empty column, stopping scan");
                    summary.stopped_at = Some(col);
                    summary.columns.push(report);
                    break;
                }
            }

            tracing::debug!(
                column = %report.letter,
                kind = %report.kind,
                filled = report.filled,
                flagged = report.flagged,
                "column reconciled"
            );
            summary.columns.push(report);
        }

        Ok(summary)
    }

    fn check_shape(&self, table: &Table) -> Result<usize> {
        let header = table.first().ok_or(ReconError::NoHeader)?;
        let width = header.len();
        let identifiers = self.options.identifier_columns;

        if width <= identifiers {
            return Err(ReconError::TooFewColumns {
                found: width,
                required: identifiers + 1,
                identifiers,
            });
        }

        if let Some((row, cells)) = table.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ReconError::Ragged {
                row,
                expected: width,
                actual: cells.len(),
            });
        }

        Ok(width)
    }

    fn differs(&self, left: &str, right: &str) -> bool {
        match self.options.comparison {
            Comparison::Raw => left != right,
            Comparison::Semantic => strip_marker(left) != strip_marker(right),
        }
    }

    /// Partial dated column: fill gaps from the left, flag divergent values.
    fn carry_forward(&self, table: &mut Table, col: usize, report: &mut ColumnReport) {
        for row in table.iter_mut().skip(1) {
            let (before, after) = row.split_at_mut(col);
            let left = &before[col - 1];
            let right = &mut after[0];

            if !left.is_empty() && right.is_empty() {
                *right = strip_marker(left).to_string();
                report.filled += 1;
            } else if self.differs(left, right) {
                mark(right);
                report.flagged += 1;
            }
        }
    }

    /// Undated column with values: label it and flag every data cell.
    fn open_new_period(&self, table: &mut Table, col: usize, report: &mut ColumnReport) {
        let mut rows = table.iter_mut();
        if let Some(header) = rows.next() {
            header[col] = format!("{}{MARKER}", self.options.sentinel_label);
            report.flagged += 1;
        }
        for row in rows {
            mark(&mut row[col]);
            report.flagged += 1;
        }
    }
}

/// Reconcile with default options and return the annotated table.
pub fn reconcile(table: Table) -> Result<Table> {
    Reconciler::default()
        .reconcile(table)
        .map(|reconciled| reconciled.table)
}
