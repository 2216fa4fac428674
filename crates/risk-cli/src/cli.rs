//! CLI argument definitions for the risk report viewer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use risk_cli::request::{HiddenValue, SortSpec, ViewRequest};

/// Address of the prediction API the report download links point at.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[derive(Parser)]
#[command(
    name = "risk-viewer",
    version,
    about = "Browse student risk prediction results in the terminal",
    long_about = "Browse the result of a student risk prediction.\n\n\
                  Reads the JSON body returned by the prediction API and shows it as a\n\
                  table. Columns can be chosen, values hidden and one column sorted."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow student-level values in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the result table.
    Show(ShowArgs),

    /// List every column in the report and whether it is shown by default.
    Columns(ReportArgs),

    /// List the distinct values of one column.
    Values(ValuesArgs),
}

#[derive(Args)]
pub struct ReportArgs {
    /// Prediction result JSON (`rows`, `report_filename`, `report_url`, `data`).
    #[arg(value_name = "PAYLOAD")]
    pub payload: PathBuf,

    /// Base URL of the prediction API, used for the report download link.
    #[arg(
        long = "api-base",
        env = "RISK_API_BASE",
        default_value = DEFAULT_API_BASE,
        value_name = "URL"
    )]
    pub api_base: String,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub report: ReportArgs,

    /// Comma-separated columns to show instead of the defaults.
    #[arg(long = "columns", value_delimiter = ',', value_name = "COLS")]
    pub columns: Option<Vec<String>>,

    /// Show a hidden column or hide a shown one (repeatable).
    #[arg(long = "toggle-column", value_name = "COL")]
    pub toggle_columns: Vec<String>,

    /// Remove a column from the table (repeatable).
    #[arg(long = "hide-column", value_name = "COL")]
    pub hide_columns: Vec<String>,

    /// Hide rows whose COL equals VALUE; `COL=` hides blanks (repeatable).
    #[arg(long = "hide-value", value_name = "COL=VALUE")]
    pub hidden_values: Vec<HiddenValue>,

    /// Sort by one column, `COL` or `COL:asc` / `COL:desc`.
    #[arg(long = "sort", value_name = "COL[:DIR]")]
    pub sort: Option<SortSpec>,

    /// Print at most this many rows.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,
}

impl ShowArgs {
    pub fn view_request(&self) -> ViewRequest {
        ViewRequest {
            columns: self.columns.clone(),
            toggle_columns: self.toggle_columns.clone(),
            hide_columns: self.hide_columns.clone(),
            hidden_values: self.hidden_values.clone(),
            sort: self.sort.clone(),
        }
    }
}

#[derive(Args)]
pub struct ValuesArgs {
    #[command(flatten)]
    pub report: ReportArgs,

    /// Column whose values to list.
    #[arg(value_name = "COLUMN")]
    pub column: String,

    /// Mark values as hidden in the listing (repeatable).
    #[arg(long = "hide-value", value_name = "COL=VALUE")]
    pub hidden_values: Vec<HiddenValue>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
