//! # carryover-cli
//!
//! Reconciles the period columns of one or more worksheets and writes them
//! back with changed cells highlighted.

mod config;

use anyhow::{bail, Context, Result};
use carryover_recon::{ReconcileSummary, Reconciler};
use carryover_sheet::{render, save_workbook, worksheet_names, Grid, HighlightStyle, Rendered};
use clap::Parser;
use colored::Colorize;
use config::{default_output, Config};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// carryover - carry status values forward and flag what changed
#[derive(Parser)]
#[command(name = "carryover")]
#[command(author, version, about = "Carry period values forward and highlight changes", long_about = None)]
struct Cli {
    /// Config file
    #[arg(short = 'c', long = "config", default_value = "config.yml")]
    config: PathBuf,

    /// Workbook to read (overrides table.table_name)
    #[arg(short = 'w', long = "workbook", value_name = "FILE")]
    workbook: Option<PathBuf>,

    /// Worksheet to process; repeat to process several (overrides table.worksheet_names)
    #[arg(short = 's', long = "sheet", value_name = "NAME")]
    sheets: Vec<String>,

    /// Reconcile a single CSV/TSV file instead of a workbook
    #[arg(long = "csv", value_name = "FILE", conflicts_with_all = ["workbook", "sheets"])]
    csv: Option<PathBuf>,

    /// Output file (.xlsx keeps highlights; .csv/.tsv holds one sheet)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Reconcile and report without writing anything
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Report format (table, json)
    #[arg(short = 'f', long = "format", default_value = "table")]
    format: ReportFormat,

    /// Write logs to this file instead of stderr
    #[arg(long = "log-file", value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output format for the run report.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum ReportFormat {
    /// One line per worksheet (default)
    #[default]
    Table,
    /// JSON document
    Json,
}

/// One processed worksheet
#[derive(Debug)]
struct SheetOutcome {
    rendered: Rendered,
    summary: ReconcileSummary,
}

#[derive(Serialize)]
struct SheetReport<'a> {
    sheet: &'a str,
    highlights: Vec<&'a str>,
    #[serde(flatten)]
    summary: &'a ReconcileSummary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_file.as_deref())?;

    if let Err(e) = run(&cli) {
        tracing::error!("{e:#}");
        if let Some(path) = &cli.log_file {
            eprintln!(
                "{} run failed, details in {}",
                "Error:".red().bold(),
                path.display()
            );
        }
        return Err(e);
    }

    Ok(())
}

/// Initialize the tracing subscriber, to stderr or to a log file.
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

/// Load config, apply overrides and run the selected mode.
fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let reconciler = Reconciler::new(config.reconcile.clone());
    let style = config.highlight_style()?;

    let (outcomes, source, default_out) = if let Some(csv) = &cli.csv {
        tracing::info!(path = %csv.display(), "reading CSV");
        let grid = Grid::from_csv(csv)
            .with_context(|| format!("Failed to read CSV: {}", csv.display()))?;
        (vec![process_sheet(&reconciler, grid)?], None, default_output(csv))
    } else {
        let workbook = config.workbook()?;
        let sheets = config.worksheets()?;
        tracing::info!(path = %workbook.display(), sheets = sheets.len(), "reading workbook");

        let outcomes = sheets
            .iter()
            .map(|name| {
                let grid = Grid::from_xlsx_sheet(workbook, name).with_context(|| {
                    format!("Failed to read worksheet '{name}' from {}", workbook.display())
                })?;
                process_sheet(&reconciler, grid)
            })
            .collect::<Result<Vec<_>>>()?;
        (outcomes, Some(workbook), default_output(workbook))
    };

    let output = cli
        .output
        .clone()
        .or_else(|| config.table.output.clone())
        .unwrap_or(default_out);

    print_report(&outcomes, cli.format)?;

    if cli.dry_run {
        tracing::info!("dry run, nothing written");
        return Ok(());
    }

    let mut rendered: Vec<Rendered> = outcomes.into_iter().map(|o| o.rendered).collect();
    if let Some(workbook) = source.filter(|_| is_xlsx(&output)) {
        rendered = with_other_worksheets(workbook, rendered)?;
    }
    write_output(&output, &rendered, style)?;
    tracing::info!(path = %output.display(), "written");
    if matches!(cli.format, ReportFormat::Table) {
        println!("{} {}", "Written:".green().bold(), output.display());
    }

    Ok(())
}

/// Read the config file and fold in CLI overrides. The file is optional when
/// the flags alone name the input (`--csv`, or `--workbook` with `--sheet`).
fn load_config(cli: &Cli) -> Result<Config> {
    let flags_name_input =
        cli.csv.is_some() || (cli.workbook.is_some() && !cli.sheets.is_empty());
    let mut config = if flags_name_input && !cli.config.exists() {
        Config::default()
    } else {
        Config::load(&cli.config)
            .with_context(|| format!("Failed to load config: {}", cli.config.display()))?
    };

    if let Some(workbook) = &cli.workbook {
        config.table.table_name = Some(workbook.clone());
    }
    if !cli.sheets.is_empty() {
        config.table.worksheet_names.clone_from(&cli.sheets);
    }

    Ok(config)
}

/// Reconcile one grid and render it for write-back.
fn process_sheet(reconciler: &Reconciler, grid: Grid) -> Result<SheetOutcome> {
    let (name, rows) = grid.into_parts();
    let reconciled = reconciler
        .reconcile(rows)
        .with_context(|| format!("Failed to reconcile worksheet '{name}'"))?;

    let summary = reconciled.summary;
    tracing::info!(
        sheet = %name,
        columns = summary.columns.len(),
        filled = summary.filled(),
        flagged = summary.flagged(),
        stopped_at = ?summary.stopped_at,
        "worksheet reconciled"
    );

    let rendered = render(Grid::from_rows(&name, reconciled.table));
    Ok(SheetOutcome { rendered, summary })
}

/// Place the reconciled sheets among the rest of the workbook's worksheets,
/// in workbook order, so write-back leaves the others as they were.
fn with_other_worksheets(workbook: &Path, mut processed: Vec<Rendered>) -> Result<Vec<Rendered>> {
    let names = worksheet_names(workbook)
        .with_context(|| format!("Failed to list worksheets of {}", workbook.display()))?;

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        match processed.iter().position(|r| r.name == name) {
            Some(i) => sheets.push(processed.remove(i)),
            None => {
                let grid = Grid::from_xlsx_sheet(workbook, &name).with_context(|| {
                    format!("Failed to read worksheet '{name}' from {}", workbook.display())
                })?;
                tracing::debug!(sheet = %name, "keeping worksheet unchanged");
                sheets.push(Rendered::unchanged(grid));
            }
        }
    }
    Ok(sheets)
}

fn is_xlsx(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"))
}

/// Write rendered sheets; the extension picks the format.
fn write_output(path: &Path, sheets: &[Rendered], style: HighlightStyle) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("xlsx") => save_workbook(path, sheets, style)
            .with_context(|| format!("Failed to write workbook: {}", path.display())),
        Some("csv" | "tsv") => match sheets {
            [sheet] => sheet
                .save_as_csv(path)
                .with_context(|| format!("Failed to write CSV: {}", path.display())),
            _ => bail!(
                "CSV output holds one worksheet, got {}; use an .xlsx output",
                sheets.len()
            ),
        },
        _ => bail!(
            "Unsupported output extension: {} (expected .xlsx, .csv or .tsv)",
            path.display()
        ),
    }
}

/// Print the run report in the requested format.
fn print_report(outcomes: &[SheetOutcome], format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Table => {
            for outcome in outcomes {
                println!("{}", format_outcome(outcome));
            }
        }
        ReportFormat::Json => {
            let reports: Vec<SheetReport<'_>> = outcomes.iter().map(sheet_report).collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }
    Ok(())
}

fn sheet_report(outcome: &SheetOutcome) -> SheetReport<'_> {
    SheetReport {
        sheet: &outcome.rendered.name,
        highlights: outcome
            .rendered
            .highlights
            .iter()
            .map(|h| h.address.as_str())
            .collect(),
        summary: &outcome.summary,
    }
}

/// One report line for a worksheet.
fn format_outcome(outcome: &SheetOutcome) -> String {
    let summary = &outcome.summary;
    let stop = match summary.stopped_at {
        Some(_) => {
            let letter = summary
                .columns
                .last()
                .map_or_else(String::new, |c| c.letter.clone());
            format!("stopped at column {letter}")
        }
        None => "all columns scanned".to_string(),
    };

    format!(
        "{} {} filled, {} flagged, {}",
        format!("{}:", outcome.rendered.name).cyan().bold(),
        summary.filled(),
        summary.flagged().to_string().yellow(),
        stop
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn status_grid(name: &str) -> Grid {
        Grid::from_rows(
            name,
            vec![
                vec!["", "", "", "2024-01", "2024-02"],
                vec!["id1", "a", "b", "y", "z"],
                vec!["id2", "a", "b", "y", ""],
            ],
        )
    }

    // ========================================================================
    // CLI argument parsing tests
    // ========================================================================

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["carryover"]);
        assert_eq!(cli.config, PathBuf::from("config.yml"));
        assert!(cli.sheets.is_empty());
        assert!(cli.csv.is_none());
        assert!(!cli.dry_run);
        assert!(matches!(cli.format, ReportFormat::Table));
    }

    #[test]
    fn test_cli_parse_sheets() {
        let cli = Cli::parse_from(["carryover", "-s", "May", "--sheet", "June", "-w", "s.xlsx"]);
        assert_eq!(cli.sheets, vec!["May", "June"]);
        assert_eq!(cli.workbook, Some(PathBuf::from("s.xlsx")));
    }

    #[test]
    fn test_cli_csv_conflicts_with_sheets() {
        let result = Cli::try_parse_from(["carryover", "--csv", "a.csv", "-s", "May"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_format_and_flags() {
        let cli = Cli::parse_from([
            "carryover", "-f", "json", "--dry-run", "-v", "--log-file", "log.log",
        ]);
        assert!(matches!(cli.format, ReportFormat::Json));
        assert!(cli.dry_run);
        assert!(cli.verbose);
        assert_eq!(cli.log_file, Some(PathBuf::from("log.log")));
    }

    // ========================================================================
    // Pipeline tests
    // ========================================================================

    #[test]
    fn test_process_sheet() {
        let outcome = process_sheet(&Reconciler::default(), status_grid("June")).unwrap();

        assert_eq!(outcome.rendered.values[1][4], "z");
        assert_eq!(outcome.rendered.values[2][4], "y");
        assert_eq!(outcome.rendered.highlights.len(), 1);
        assert_eq!(outcome.rendered.highlights[0].address, "E2");
        assert_eq!(outcome.summary.filled(), 1);
    }

    #[test]
    fn test_process_sheet_shape_error_names_sheet() {
        let grid = Grid::from_rows("Narrow", vec![vec!["id", "a", "b"]]);
        let err = process_sheet(&Reconciler::default(), grid).unwrap_err();
        assert!(format!("{err:#}").contains("'Narrow'"));
    }

    #[test]
    fn test_format_outcome() {
        let outcome = process_sheet(&Reconciler::default(), status_grid("June")).unwrap();
        colored::control::set_override(false);
        assert_eq!(
            format_outcome(&outcome),
            "June: 1 filled, 1 flagged, all columns scanned"
        );
    }

    #[test]
    fn test_sheet_report_json() {
        let outcome = process_sheet(&Reconciler::default(), status_grid("June")).unwrap();
        let json = serde_json::to_value(sheet_report(&outcome)).unwrap();
        assert_eq!(json["sheet"], "June");
        assert_eq!(json["highlights"][0], "E2");
        assert_eq!(json["stopped_at"], serde_json::Value::Null);
        assert_eq!(json["columns"][1]["kind"], "partial");
    }

    #[test]
    fn test_write_output_formats() {
        let dir = tempdir().unwrap();
        let outcome = process_sheet(&Reconciler::default(), status_grid("June")).unwrap();
        let sheets = vec![outcome.rendered.clone(), outcome.rendered];

        let xlsx = dir.path().join("out.xlsx");
        write_output(&xlsx, &sheets[..1], HighlightStyle::default()).unwrap();
        assert!(xlsx.exists());

        let csv = dir.path().join("out.csv");
        write_output(&csv, &sheets[..1], HighlightStyle::default()).unwrap();
        let content = std::fs::read_to_string(&csv).unwrap();
        assert!(content.contains("id1,a,b,y,z\n"));
        assert!(!content.contains('|'));

        assert!(write_output(&csv, &sheets, HighlightStyle::default()).is_err());
        assert!(write_output(&dir.path().join("out.txt"), &sheets, HighlightStyle::default()).is_err());
    }

    #[test]
    fn test_run_csv_mode() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("june.csv");
        std::fs::write(&input, ",,,2024-05,2024-06\nid1,a,b,open,\nid2,a,b,open,closed\n").unwrap();

        let cli = Cli::parse_from([
            "carryover",
            "--config",
            dir.path().join("missing.yml").to_str().unwrap(),
            "--csv",
            input.to_str().unwrap(),
        ]);
        run(&cli).unwrap();

        let written = std::fs::read_to_string(dir.path().join("june.reconciled.csv")).unwrap();
        assert_eq!(written, ",,,2024-05,2024-06\nid1,a,b,open,open\nid2,a,b,open,closed\n");
    }

    #[test]
    fn test_run_workbook_mode() {
        let dir = tempdir().unwrap();
        let workbook = dir.path().join("status.xlsx");
        let seed: Vec<Rendered> = ["May", "June"]
            .iter()
            .map(|name| render(status_grid(name)))
            .collect();
        save_workbook(&workbook, &seed, HighlightStyle::default()).unwrap();

        let config_path = dir.path().join("config.yml");
        std::fs::write(
            &config_path,
            format!(
                "table:\n  table_name: {}\n  worksheet_names: [June]\n",
                workbook.display()
            ),
        )
        .unwrap();

        let output = dir.path().join("result.xlsx");
        let cli = Cli::parse_from([
            "carryover",
            "--config",
            config_path.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]);
        run(&cli).unwrap();

        assert_eq!(worksheet_names(&output).unwrap(), vec!["May", "June"]);
        let june = Grid::from_xlsx_sheet(&output, "June").unwrap();
        assert_eq!(june.get_a1("E2").unwrap(), "z");
        assert_eq!(june.get_a1("E3").unwrap(), "y");
        let may = Grid::from_xlsx_sheet(&output, "May").unwrap();
        assert_eq!(may.get_a1("E3").unwrap(), "");
    }

    #[test]
    fn test_write_back_in_place_keeps_other_worksheets() {
        let dir = tempdir().unwrap();
        let workbook = dir.path().join("status.xlsx");
        let seed = vec![
            render(status_grid("May")),
            render(status_grid("June")),
            render(Grid::from_rows("Notes", vec![vec!["call Ann", "a|b"]])),
        ];
        save_workbook(&workbook, &seed, HighlightStyle::default()).unwrap();

        let cli = Cli::parse_from([
            "carryover",
            "--config",
            dir.path().join("missing.yml").to_str().unwrap(),
            "-w",
            workbook.to_str().unwrap(),
            "-s",
            "June",
            "-o",
            workbook.to_str().unwrap(),
        ]);
        run(&cli).unwrap();

        assert_eq!(worksheet_names(&workbook).unwrap(), vec!["May", "June", "Notes"]);
        let may = Grid::from_xlsx_sheet(&workbook, "May").unwrap();
        assert_eq!(may.get_a1("E3").unwrap(), "");
        let june = Grid::from_xlsx_sheet(&workbook, "June").unwrap();
        assert_eq!(june.get_a1("E3").unwrap(), "y");
        let notes = Grid::from_xlsx_sheet(&workbook, "Notes").unwrap();
        assert_eq!(notes.get_a1("A1").unwrap(), "call Ann");
        assert_eq!(notes.get_a1("B1").unwrap(), "a");
    }

    #[test]
    fn test_load_config_from_flags_only() {
        let missing = std::env::temp_dir().join("carryover-missing-config.yml");
        let cli = Cli::parse_from([
            "carryover",
            "--config",
            missing.to_str().unwrap(),
            "-w",
            "s.xlsx",
            "-s",
            "June",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.workbook().unwrap(), Path::new("s.xlsx"));
        assert_eq!(config.worksheets().unwrap(), ["June"]);

        // Without a sheet the config file is still required
        let cli = Cli::parse_from([
            "carryover",
            "--config",
            missing.to_str().unwrap(),
            "-w",
            "s.xlsx",
        ]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn test_run_dry_run_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("june.csv");
        std::fs::write(&input, ",,,2024-05\nid1,a,b,open\n").unwrap();

        let cli = Cli::parse_from([
            "carryover",
            "--config",
            dir.path().join("missing.yml").to_str().unwrap(),
            "--csv",
            input.to_str().unwrap(),
            "--dry-run",
        ]);
        run(&cli).unwrap();

        assert!(!dir.path().join("june.reconciled.csv").exists());
    }
}
