use serde::Serialize;
use std::fmt;

/// What a period column looks like before it is reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Dated, every data cell filled: left alone
    Complete,
    /// Dated, some data cells filled: carried forward and compared
    Partial,
    /// Undated but has values: a new period, every cell flagged
    Unlabeled,
    /// Nothing usable: the scan stops here
    Empty,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Partial => write!(f, "partial"),
            Self::Unlabeled => write!(f, "unlabeled"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

/// Classify column `col` of `table` (row 0 is the header).
///
/// A dated column with no data rows counts as complete. A dated column whose
/// data cells are all empty is neither complete nor partial and classifies
/// as [`ColumnKind::Empty`], same as an undated one. Cells past the end of a
/// short row count as empty.
pub fn classify_column(table: &[Vec<String>], col: usize) -> ColumnKind {
    let dated = table
        .first()
        .and_then(|header| header.get(col))
        .is_some_and(|label| !label.is_empty());

    let (all, any) = table
        .iter()
        .skip(1)
        .map(|row| row.get(col).is_some_and(|c| !c.is_empty()))
        .fold((true, false), |(all, any), filled| (all && filled, any || filled));

    match (dated, all, any) {
        (true, true, _) => ColumnKind::Complete,
        (true, false, true) => ColumnKind::Partial,
        (false, _, true) => ColumnKind::Unlabeled,
        _ => ColumnKind::Empty,
    }
}
