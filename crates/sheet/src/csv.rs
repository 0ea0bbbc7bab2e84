use crate::error::Result;
use crate::grid::Grid;
use crate::render::Rendered;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// CSV reader/writer options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl CsvOptions {
    /// Create options for TSV (tab-separated values)
    #[must_use]
    pub fn tsv() -> Self {
        CsvOptions {
            delimiter: b'\t',
            ..Default::default()
        }
    }

    /// Pick options from a file extension (`.tsv` means tabs)
    #[must_use]
    pub fn for_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => Self::tsv(),
            _ => Self::default(),
        }
    }

    /// Set the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Grid {
    /// Load a grid from a CSV file, named after the file stem
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let options = CsvOptions::for_path(&path);
        Self::from_csv_with_options(path, options)
    }

    /// Load a grid from a CSV file with custom options
    pub fn from_csv_with_options<P: AsRef<Path>>(path: P, options: CsvOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Sheet1")
            .to_string();
        Self::from_csv_reader(&name, BufReader::new(file), options)
    }

    /// Load a grid from a CSV string
    pub fn from_csv_str(name: &str, content: &str) -> Result<Self> {
        Self::from_csv_reader(name, content.as_bytes(), CsvOptions::default())
    }

    /// Load a grid from a reader. Cells are kept as text; ragged records are padded.
    pub fn from_csv_reader<R: Read>(name: &str, reader: R, options: CsvOptions) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false) // Row 0 is data to us
            .flexible(true)
            .from_reader(reader);

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Grid::from_rows(name, rows))
    }
}

impl Rendered {
    /// Save the clean values to a CSV file
    pub fn save_as_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let options = CsvOptions::for_path(&path);
        let file = File::create(path)?;
        self.write_csv(BufWriter::new(file), options)
    }

    /// Write the clean values to a writer as CSV
    pub fn write_csv<W: Write>(&self, writer: W, options: CsvOptions) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .from_writer(writer);

        for row in &self.values {
            csv_writer.write_record(row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Convert the clean values to a CSV string
    #[must_use]
    pub fn to_csv_string(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into memory cannot fail
        let _ = self.write_csv(&mut buffer, CsvOptions::default());
        String::from_utf8_lossy(&buffer).to_string()
    }
}
