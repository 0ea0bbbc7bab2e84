//! `config.yml` loading.

use carryover_recon::ReconcileOptions;
use carryover_sheet::HighlightStyle;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while loading or checking the config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which workbook and worksheets to process
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Workbook to read
    pub table_name: Option<PathBuf>,
    /// Worksheets to reconcile, in order
    pub worksheet_names: Vec<String>,
    /// Where to write; defaults to `<stem>.reconciled.<ext>` next to the input
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// `#RRGGBB` fill for changed cells
    pub color: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        HighlightConfig {
            color: HighlightStyle::default().hex(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub table: TableConfig,
    pub reconcile: ReconcileOptions,
    pub highlight: HighlightConfig,
}

impl Config {
    /// Load and check a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and check a YAML document
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that hold for every mode
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.highlight_style()?;
        self.reconcile
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// The workbook to read, which workbook mode requires
    pub fn workbook(&self) -> Result<&Path, ConfigError> {
        self.table
            .table_name
            .as_deref()
            .ok_or_else(|| ConfigError::Invalid("table.table_name is not set".to_string()))
    }

    /// Worksheets to process, which workbook mode requires to be non-empty
    pub fn worksheets(&self) -> Result<&[String], ConfigError> {
        if self.table.worksheet_names.is_empty() {
            return Err(ConfigError::Invalid(
                "table.worksheet_names is empty".to_string(),
            ));
        }
        Ok(&self.table.worksheet_names)
    }

    pub fn highlight_style(&self) -> Result<HighlightStyle, ConfigError> {
        self.highlight
            .color
            .parse::<HighlightStyle>()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// `<dir>/<stem>.reconciled.<ext>` for an input path
pub fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table");
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("xlsx");
    input.with_file_name(format!("{stem}.reconciled.{ext}"))
}
