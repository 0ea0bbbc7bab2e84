use crate::error::{Result, SheetError};
use crate::grid::Grid;
use crate::render::{HighlightStyle, Rendered};
use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::Timelike;
use rust_xlsxwriter::{Format, FormatPattern, Workbook, Worksheet};
use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn xlsx_error(e: impl Display) -> SheetError {
    SheetError::Xlsx(e.to_string())
}

/// Render a calamine cell as the text a user sees in the sheet
fn data_to_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::Bool(b) => b.to_string().to_uppercase(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{f:.0}")
            } else {
                f.to_string()
            }
        }
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) if naive.num_seconds_from_midnight() == 0 => {
                naive.format("%Y-%m-%d").to_string()
            }
            Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::Error(e) => format!("#ERROR: {e:?}"),
    }
}

fn open<P: AsRef<Path>>(path: P) -> Result<Xlsx<BufReader<File>>> {
    open_workbook(path.as_ref()).map_err(xlsx_error)
}

/// Names of the worksheets in an Excel file, in workbook order
pub fn worksheet_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    Ok(open(path)?.sheet_names())
}

impl Grid {
    /// Load one worksheet from an Excel file by name, every cell as text
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened, the worksheet is missing, or read fails.
    pub fn from_xlsx_sheet<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Self> {
        let mut workbook = open(path)?;

        if !workbook.sheet_names().iter().any(|n| n == sheet_name) {
            return Err(SheetError::WorksheetNotFound {
                name: sheet_name.to_string(),
            });
        }

        let range = workbook.worksheet_range(sheet_name).map_err(xlsx_error)?;

        // calamine starts the range at the first used cell; pad back to A1
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];
        for row in range.rows() {
            let mut cells = vec![String::new(); start_col as usize];
            cells.extend(row.iter().map(data_to_text));
            rows.push(cells);
        }

        Ok(Grid::from_rows(sheet_name, rows))
    }
}

impl Rendered {
    /// Save this grid alone as an Excel file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P, style: HighlightStyle) -> Result<()> {
        save_workbook(path, std::slice::from_ref(self), style)
    }

    /// Write values to a worksheet, filling highlighted cells
    fn write_to_worksheet(&self, worksheet: &mut Worksheet, highlight: &Format) -> Result<()> {
        worksheet.set_name(&self.name).map_err(xlsx_error)?;

        for (row_idx, row) in self.values.iter().enumerate() {
            let row_num = u32::try_from(row_idx).map_err(|_| xlsx_error("Row index overflow"))?;
            for (col_idx, value) in row.iter().enumerate() {
                let col_num =
                    u16::try_from(col_idx).map_err(|_| xlsx_error("Column index overflow"))?;
                if !value.is_empty() {
                    worksheet
                        .write_string(row_num, col_num, value)
                        .map_err(xlsx_error)?;
                }
            }
        }

        for h in &self.highlights {
            let row_num = u32::try_from(h.row).map_err(|_| xlsx_error("Row index overflow"))?;
            let col_num = u16::try_from(h.col).map_err(|_| xlsx_error("Column index overflow"))?;
            let value = &self.values[h.row][h.col];
            if value.is_empty() {
                worksheet
                    .write_blank(row_num, col_num, highlight)
                    .map_err(xlsx_error)?;
            } else {
                worksheet
                    .write_string_with_format(row_num, col_num, value, highlight)
                    .map_err(xlsx_error)?;
            }
        }

        Ok(())
    }
}

/// Save rendered grids as worksheets of one Excel file, in the given order
///
/// # Errors
///
/// Returns error if a worksheet name is rejected or the file cannot be written.
pub fn save_workbook<P: AsRef<Path>>(
    path: P,
    sheets: &[Rendered],
    style: HighlightStyle,
) -> Result<()> {
    let highlight = Format::new()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(style.color);

    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        sheet.write_to_worksheet(worksheet, &highlight)?;
    }

    workbook.save(path.as_ref()).map_err(xlsx_error)?;
    Ok(())
}
