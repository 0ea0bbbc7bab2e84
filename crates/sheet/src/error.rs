use thiserror::Error;

/// Errors that can occur while loading, addressing or saving a grid
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Index out of bounds: row {row}, col {col} (grid has {rows} rows, {cols} cols)")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid cell notation: {0}")]
    InvalidCellNotation(String),

    #[error("Worksheet not found: {name}")]
    WorksheetNotFound { name: String },

    #[error("Invalid highlight color: {0} (expected #RRGGBB)")]
    InvalidColor(String),

    #[error("XLSX error: {0}")]
    Xlsx(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SheetError>;
