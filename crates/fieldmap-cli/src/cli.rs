//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use fieldmap_cli::script::ClickSpec;

#[derive(Parser)]
#[command(
    name = "fieldmap",
    version,
    about = "Map fields between an existing and a new dataset",
    long_about = "Inspect and compare JSON, CSV or TSV datasets, pair their fields by\n\
                  replaying clicks, export the mapping document and submit merges."
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

    /// Merge service base URL (overrides FIELDMAP_API_URL).
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides FIELDMAP_API_TIMEOUT_SECS).
    #[arg(long = "timeout", value_name = "SECS", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the tables, fields and first rows of a dataset.
    Inspect(InspectArgs),

    /// Compare the fields of two datasets.
    Compare(CompareArgs),

    /// Build field mappings by replaying clicks and export them.
    Map(MapArgs),

    /// Build field mappings and submit them to the merge service.
    Merge(MergeArgs),
}

#[derive(Args)]
pub struct InspectArgs {
    /// JSON, CSV or TSV file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Table to show (default: the first table).
    #[arg(long = "table", value_name = "NAME")]
    pub table: Option<String>,

    /// Number of preview rows.
    #[arg(long = "rows", value_name = "N", default_value_t = 10)]
    pub rows: usize,
}

#[derive(Args)]
pub struct CompareArgs {
    #[arg(value_name = "EXISTING")]
    pub existing: PathBuf,

    #[arg(value_name = "NEW")]
    pub new: PathBuf,
}

/// Inputs shared by `map` and `merge`.
#[derive(Args)]
pub struct SessionArgs {
    /// Existing dataset file.
    #[arg(
        long = "existing",
        value_name = "FILE",
        required_unless_present = "existing_from_server",
        conflicts_with = "existing_from_server"
    )]
    pub existing: Option<PathBuf>,

    /// Fetch the existing schema from the merge service instead of a file.
    #[arg(long = "existing-from-server")]
    pub existing_from_server: bool,

    /// New dataset file.
    #[arg(long = "new", value_name = "FILE")]
    pub new: PathBuf,

    /// Active table of the existing side.
    #[arg(long = "existing-table", value_name = "NAME")]
    pub existing_table: Option<String>,

    /// Active table of the new side.
    #[arg(long = "new-table", value_name = "NAME")]
    pub new_table: Option<String>,

    /// Field click, as existing:<field> or new:<field>. Repeat in order.
    #[arg(long = "click", value_name = "SIDE:FIELD", required = true)]
    pub clicks: Vec<ClickSpec>,
}

#[derive(Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Where to write the export document (default: field-mappings.json).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct MergeArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Let the merge service decode the new file instead of reading it locally.
    #[arg(long = "upload")]
    pub upload: bool,
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
