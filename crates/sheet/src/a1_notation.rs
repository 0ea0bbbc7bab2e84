use crate::error::{Result, SheetError};

/// Parse A1-style cell notation (e.g., "A1", "Z99", "AA1")
/// Returns (row, column) as 0-based indices
pub fn parse_a1(notation: &str) -> Result<(usize, usize)> {
    if notation.is_empty() {
        return Err(SheetError::InvalidCellNotation(notation.to_string()));
    }

    let notation = notation.to_uppercase();

    // Letters first, then digits
    let split_pos = notation
        .bytes()
        .position(|b| b.is_ascii_digit())
        .unwrap_or(0);

    if split_pos == 0 {
        return Err(SheetError::InvalidCellNotation(notation));
    }

    let (col_part, row_part) = notation.split_at(split_pos);

    let col = parse_column_letters(col_part)?;
    let row = row_part
        .parse::<usize>()
        .map_err(|_| SheetError::InvalidCellNotation(notation.clone()))?;

    if row == 0 {
        return Err(SheetError::InvalidCellNotation(notation));
    }

    Ok((row - 1, col))
}

/// Convert column letters to 0-based column index
/// A=0, B=1, ... Z=25, AA=26, AB=27, ...
fn parse_column_letters(col_str: &str) -> Result<usize> {
    let mut col = 0usize;

    for b in col_str.bytes() {
        if !b.is_ascii_uppercase() {
            return Err(SheetError::InvalidCellNotation(col_str.to_string()));
        }
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(usize::from(b - b'A') + 1))
            .ok_or_else(|| SheetError::InvalidCellNotation(col_str.to_string()))?;
    }

    Ok(col - 1)
}

/// Bijective base-26 label for a 1-based column number.
///
/// 1 = "A", 26 = "Z", 27 = "AA", 702 = "ZZ", 703 = "AAA". There is no zero
/// digit, so `0` has no label and yields an empty string.
#[must_use]
pub fn column_index_to_label(mut n: usize) -> String {
    let mut result = Vec::new();

    while n > 0 {
        n -= 1;
        result.push(b'A' + (n % 26) as u8);
        n /= 26;
    }

    result.reverse();
    String::from_utf8(result).unwrap_or_default()
}

/// Convert 0-based column index to column letters
/// 0=A, 1=B, ... 25=Z, 26=AA, 27=AB, ...
#[must_use]
pub fn column_index_to_letters(col: usize) -> String {
    column_index_to_label(col + 1)
}

/// Convert 0-based (row, col) to A1 notation
/// (0, 0) = "A1", (0, 1) = "B1", etc.
#[must_use]
pub fn to_a1_notation(row: usize, col: usize) -> String {
    format!("{}{}", column_index_to_letters(col), row + 1)
}
