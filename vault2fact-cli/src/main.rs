//! vault2fact CLI - Command-line interface for vault2fact
//!
//! Converts a Bitwarden CSV export into factotum control lines, written to
//! standard output, a file, or a mounted factotum's `ctl` file, and checks
//! exports without writing any secrets.

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::info;
use vault2fact_core::config::{ConfigManager, Settings};
use vault2fact_core::convert::{ConversionSummary, Converter, SkippedEntry};
use vault2fact_core::error::ConvertError;
use vault2fact_core::factotum::ComposeOptions;
use vault2fact_core::import::{BitwardenCsvImporter, ImportSource, RecordBatch};
use vault2fact_core::logging;
use vault2fact_core::output::OutputTarget;
use vault2fact_core::progress::TracingProgressReporter;

/// Path value meaning "read from standard input"
const STDIN_PATH: &str = "-";

/// vault2fact command-line interface
#[derive(Parser)]
#[command(name = "vault2fact-cli")]
#[command(version, about = "Convert password-manager exports into factotum keys")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Convert an export into factotum control lines
    #[command(about = "Convert a Bitwarden CSV export into factotum control lines")]
    Convert {
        /// Path to the Bitwarden CSV export ("-" for standard input)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (default: standard output)
        #[arg(short, long, conflicts_with = "apply")]
        out: Option<PathBuf>,

        /// Write directly to the factotum ctl file
        #[arg(short, long)]
        apply: bool,

        /// Factotum mountpoint (default from config, else /mnt/factotum)
        #[arg(short, long, requires = "apply")]
        mount: Option<PathBuf>,

        /// Quote every password, even when it is a safe bare token
        #[arg(long)]
        always_quote_password: bool,
    },

    /// Report what a conversion would do, without printing secrets
    #[command(about = "Check an export and list the records that would be skipped")]
    Check {
        /// Path to the Bitwarden CSV export ("-" for standard input)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format for the report
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write the default settings to the configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

/// Output format for the check report
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    Table,
    /// Output as JSON
    Json,
}

fn main() {
    let cli = Cli::parse();
    logging::init_subscriber(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            input,
            out,
            apply,
            mount,
            always_quote_password,
        } => cmd_convert(
            cli.config.as_deref(),
            &input,
            out,
            apply,
            mount,
            always_quote_password,
        ),
        Commands::Check { input, format } => cmd_check(cli.config.as_deref(), &input, format),
        Commands::Config(ConfigCommands::Init { force }) => {
            cmd_config_init(cli.config.as_deref(), force).map(|path| {
                println!("Wrote default settings to {}", path.display());
            })
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

/// Builds a config manager for an explicit file or the default location
fn config_manager(config: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config {
        Some(path) => Ok(ConfigManager::with_config_file(path)),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Loads settings from an explicit file or the default location
fn load_settings(config: Option<&Path>) -> Result<Settings, CliError> {
    config_manager(config)?
        .load_settings()
        .map_err(|e| CliError::Config(format!("Failed to load settings: {e}")))
}

/// Reads the export from a file or standard input
fn read_export(settings: &Settings, input: &Path) -> Result<RecordBatch, CliError> {
    let importer = BitwardenCsvImporter::with_columns(settings.import.clone());

    let batch = if input.as_os_str() == STDIN_PATH {
        importer
            .import_from_reader(&mut io::stdin().lock())
            .map(|batch| batch.with_source("stdin"))
    } else {
        importer.import_from_path(input)
    };

    batch.map_err(|e| CliError::Input(e.to_string()))
}

/// Chooses the sink from the command-line flags and settings
#[must_use]
pub fn resolve_target(
    settings: &Settings,
    out: Option<PathBuf>,
    apply: bool,
    mount: Option<PathBuf>,
) -> OutputTarget {
    if apply {
        OutputTarget::Factotum {
            mount: mount.unwrap_or_else(|| settings.output.expanded_mount()),
        }
    } else if let Some(path) = out {
        OutputTarget::File(path)
    } else {
        OutputTarget::Stdout
    }
}

/// Convert command handler
fn cmd_convert(
    config: Option<&Path>,
    input: &Path,
    out: Option<PathBuf>,
    apply: bool,
    mount: Option<PathBuf>,
    always_quote_password: bool,
) -> Result<(), CliError> {
    let settings = load_settings(config)?;
    let batch = read_export(&settings, input)?;

    // Open the sink only after the export parsed, so a bad input never
    // truncates an existing output file.
    let target = resolve_target(&settings, out, apply, mount);
    let mut writer = target
        .open()
        .map_err(|e| CliError::Output(e.to_string()))?;

    let options = ComposeOptions::default().with_always_quote_password(
        always_quote_password || settings.encoding.always_quote_password,
    );
    let progress = TracingProgressReporter::default();
    let summary = Converter::new(options)
        .convert_to(&batch.records, &mut writer, Some(&progress))
        .map_err(CliError::from)?;

    writer
        .finish()
        .map_err(|e| CliError::Output(e.to_string()))?;

    info!(sink = %target, "{}", summary.summary());
    if target != OutputTarget::Stdout {
        eprintln!("{} -> {target}", summary.summary());
    }

    Ok(())
}

/// Check command handler
fn cmd_check(config: Option<&Path>, input: &Path, format: OutputFormat) -> Result<(), CliError> {
    let settings = load_settings(config)?;
    let batch = read_export(&settings, input)?;

    let (_, summary) = Converter::default().convert_all(&batch.records);
    let report = CheckReport::new(&batch, summary);

    match format {
        OutputFormat::Table => println!("{}", format_check_table(&report)),
        OutputFormat::Json => println!("{}", format_check_json(&report)?),
    }

    Ok(())
}

/// Config init command handler, returns the path written
fn cmd_config_init(config: Option<&Path>, force: bool) -> Result<PathBuf, CliError> {
    let manager = config_manager(config)?;
    let path = manager.config_path().to_path_buf();

    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    manager
        .save_settings(&Settings::default())
        .map_err(|e| CliError::Config(format!("Failed to save settings: {e}")))?;

    info!(path = %path.display(), "Default settings written");
    Ok(path)
}

/// Result of checking an export
#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckReport {
    /// Where the records came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Number of data rows read
    pub records: usize,
    /// Number of rows that would produce a control line
    pub convertible: usize,
    /// Rows that would be skipped
    pub skipped: Vec<SkippedEntry>,
}

impl CheckReport {
    /// Builds a report from a batch and its conversion summary
    #[must_use]
    pub fn new(batch: &RecordBatch, summary: ConversionSummary) -> Self {
        Self {
            source: batch.source.clone(),
            records: batch.len(),
            convertible: summary.converted,
            skipped: summary.skipped,
        }
    }
}

/// Format a check report as a table string
#[must_use]
pub fn format_check_table(report: &CheckReport) -> String {
    let mut output = String::new();

    if let Some(ref source) = report.source {
        let _ = writeln!(output, "Source:      {source}");
    }
    let _ = writeln!(output, "Records:     {}", report.records);
    let _ = writeln!(output, "Convertible: {}", report.convertible);
    let _ = writeln!(output, "Skipped:     {}", report.skipped.len());

    if report.skipped.is_empty() {
        return output.trim_end().to_string();
    }

    let reasons: Vec<String> = report.skipped.iter().map(|s| s.reason.to_string()).collect();
    let row_width = report
        .skipped
        .iter()
        .map(|s| s.row.to_string().len())
        .max()
        .unwrap_or(3)
        .max(3);
    let reason_width = reasons.iter().map(String::len).max().unwrap_or(6).max(6);

    output.push('\n');
    let _ = writeln!(
        output,
        "{:<row_width$}  {:<reason_width$}  URI",
        "ROW", "REASON"
    );
    let _ = writeln!(output, "{:-<row_width$}  {:-<reason_width$}  {:-<3}", "", "", "");

    for (entry, reason) in report.skipped.iter().zip(&reasons) {
        let _ = writeln!(
            output,
            "{:<row_width$}  {:<reason_width$}  {}",
            entry.row, reason, entry.identifier
        );
    }

    output.trim_end().to_string()
}

/// Format a check report as JSON string
///
/// # Errors
///
/// Returns `CliError::Config` if JSON serialization fails.
pub fn format_check_json(report: &CheckReport) -> Result<String, CliError> {
    serde_json::to_string_pretty(report)
        .map_err(|e| CliError::Config(format!("Failed to serialize to JSON: {e}")))
}

/// Exit codes for CLI operations
pub mod exit_codes {
    /// Success - operation completed successfully
    pub const SUCCESS: i32 = 0;
    /// General error - configuration or other errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Input failure - export missing, unreadable, or malformed
    pub const INPUT_FAILURE: i32 = 2;
    /// Output failure - sink could not be opened or written
    pub const OUTPUT_FAILURE: i32 = 3;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input error
    #[error("Input error: {0}")]
    Input(String),

    /// Output error
    #[error("Output error: {0}")]
    Output(String),

    /// Conversion was cancelled
    #[error("Conversion cancelled")]
    Cancelled,
}

impl From<ConvertError> for CliError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::Output(e) => Self::Output(e.to_string()),
            ConvertError::Cancelled => Self::Cancelled,
        }
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, cancellation)
    /// - 2: Input failure
    /// - 3: Output failure
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Input(_) => exit_codes::INPUT_FAILURE,
            Self::Output(_) => exit_codes::OUTPUT_FAILURE,
            Self::Config(_) | Self::Cancelled => exit_codes::GENERAL_ERROR,
        }
    }
}
