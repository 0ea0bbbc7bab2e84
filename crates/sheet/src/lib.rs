//! Grid module for carryover
//!
//! Holds a worksheet as a rectangular grid of text cells, addresses cells in
//! A1 notation, and handles the change markers a reconciliation pass leaves
//! behind: [`render`] turns marked cells into highlights and strips the
//! markers so nothing internal is ever written.
//!
//! # Examples
//!
//! ## Loading from CSV
//!
//! ```
//! use carryover_sheet::Grid;
//!
//! let grid = Grid::from_csv_str("June", ",,,2024-06\nid1,a,b,open").unwrap();
//!
//! assert_eq!(grid.row_count(), 2);
//! assert_eq!(grid.col_count(), 4);
//! assert_eq!(grid.get_a1("D2").unwrap(), "open");
//! ```
//!
//! ## Rendering for write-back
//!
//! ```
//! use carryover_sheet::{render, Grid};
//!
//! let grid = Grid::from_rows("June", vec![vec!["", "", "", "2024-06"], vec!["id1", "a", "b", "closed|"]]);
//! let rendered = render(grid);
//!
//! assert_eq!(rendered.values[1][3], "closed");
//! assert_eq!(rendered.highlights[0].address, "D2");
//! ```
//!
//! ## Column labels
//!
//! ```
//! use carryover_sheet::column_index_to_label;
//!
//! assert_eq!(column_index_to_label(1), "A");
//! assert_eq!(column_index_to_label(27), "AA");
//! ```

mod a1_notation;
mod csv;
mod error;
mod grid;
pub mod marker;
mod render;
mod xlsx;

/// Re-export A1 helpers.
pub use a1_notation::{column_index_to_label, column_index_to_letters, parse_a1, to_a1_notation};
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export grid type.
pub use grid::Grid;
/// Re-export marker helpers.
pub use marker::{is_marked, mark, strip_marker, MARKER};
/// Re-export write-back rendering.
pub use render::{render, Highlight, HighlightStyle, Rendered};
/// Re-export Excel workbook helpers.
pub use xlsx::{save_workbook, worksheet_names};
