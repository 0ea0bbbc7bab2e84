use crate::a1_notation::parse_a1;
use crate::error::{Result, SheetError};

/// A named grid of text cells (row-major storage)
///
/// Rows are padded with empty cells on construction so every row has the
/// same width, the way a worksheet's value dump is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    name: String,
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Create a new empty grid
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty grid with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Grid {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    /// Create a grid from rows, padding short rows to the widest one
    #[must_use]
    pub fn from_rows<S: Into<String>>(name: &str, rows: Vec<Vec<S>>) -> Self {
        let mut rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }

        Grid {
            name: name.to_string(),
            rows,
        }
    }

    /// Get the grid name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the grid name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Check if the grid is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by 0-based row and column
    pub fn get(&self, row: usize, col: usize) -> Result<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .ok_or(SheetError::IndexOutOfBounds {
                row,
                col,
                rows: self.row_count(),
                cols: self.col_count(),
            })
    }

    /// Get a cell by A1 notation
    pub fn get_a1(&self, notation: &str) -> Result<&str> {
        let (row, col) = parse_a1(notation)?;
        self.get(row, col)
    }

    /// Borrow the rows
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Take the rows out of the grid
    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    /// Split into name and rows
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Vec<String>>) {
        (self.name, self.rows)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
