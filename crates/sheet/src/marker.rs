//! Change markers carried inside cell text.
//!
//! A reconciled cell whose value diverged from its left neighbour gets a
//! trailing [`MARKER`]. The marker is transport-only: the value of a cell is
//! always the text before its first marker, and it must be removed before the
//! grid is persisted.

/// Character appended to a cell to flag it as changed.
pub const MARKER: char = '|';

/// Whether the raw cell text carries a change marker.
#[must_use]
pub fn is_marked(raw: &str) -> bool {
    raw.contains(MARKER)
}

/// Append a marker to the raw cell text.
pub fn mark(raw: &mut String) {
    raw.push(MARKER);
}

/// The value of a cell: everything before the first marker.
#[must_use]
pub fn strip_marker(raw: &str) -> &str {
    raw.split(MARKER).next().unwrap_or(raw)
}
