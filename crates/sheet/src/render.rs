//! Turning an annotated grid into what gets persisted.
//!
//! Every marked cell becomes a highlight at its A1 address and every cell is
//! cut at its first marker, so written data never contains one.

use crate::a1_notation::column_index_to_label;
use crate::error::{Result, SheetError};
use crate::grid::Grid;
use crate::marker::{is_marked, strip_marker};
use std::str::FromStr;

/// Position of a cell to highlight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    /// 0-based row
    pub row: usize,
    /// 0-based column
    pub col: usize,
    /// A1 address, e.g. "E2"
    pub address: String,
}

impl Highlight {
    fn at(row: usize, col: usize) -> Self {
        Highlight {
            row,
            col,
            address: format!("{}{}", column_index_to_label(col + 1), row + 1),
        }
    }
}

/// Background fill applied to highlighted cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightStyle {
    /// 0xRRGGBB
    pub color: u32,
}

impl HighlightStyle {
    pub const YELLOW: HighlightStyle = HighlightStyle { color: 0x00FF_FF00 };

    /// Hex form, e.g. "#FFFF00"
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:06X}", self.color)
    }
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self::YELLOW
    }
}

impl FromStr for HighlightStyle {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| SheetError::InvalidColor(s.to_string()))?;
        let color =
            u32::from_str_radix(digits, 16).map_err(|_| SheetError::InvalidColor(s.to_string()))?;
        Ok(HighlightStyle { color })
    }
}

/// A grid ready to persist: clean values plus the cells to highlight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub name: String,
    pub values: Vec<Vec<String>>,
    pub highlights: Vec<Highlight>,
}

impl Rendered {
    /// A grid written back exactly as read: no highlights, values untouched
    #[must_use]
    pub fn unchanged(grid: Grid) -> Self {
        let (name, values) = grid.into_parts();
        Rendered {
            name,
            values,
            highlights: Vec::new(),
        }
    }

    /// Number of highlighted cells
    #[must_use]
    pub fn highlight_count(&self) -> usize {
        self.highlights.len()
    }

    /// Whether the cell at 0-based (row, col) is highlighted
    #[must_use]
    pub fn is_highlighted(&self, row: usize, col: usize) -> bool {
        self.highlights.iter().any(|h| h.row == row && h.col == col)
    }
}

/// Collect highlights from marked cells and strip every marker.
#[must_use]
pub fn render(grid: Grid) -> Rendered {
    let (name, rows) = grid.into_parts();
    let mut highlights = Vec::new();

    let values = rows
        .into_iter()
        .enumerate()
        .map(|(row_idx, row)| {
            row.into_iter()
                .enumerate()
                .map(|(col_idx, raw)| {
                    if is_marked(&raw) {
                        highlights.push(Highlight::at(row_idx, col_idx));
                        strip_marker(&raw).to_string()
                    } else {
                        raw
                    }
                })
                .collect()
        })
        .collect();

    Rendered {
        name,
        values,
        highlights,
    }
}
