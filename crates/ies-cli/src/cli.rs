//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ies",
    version,
    about = "Inspect and convert IES LM-63 photometric files",
    long_about = "Inspect and convert IES LM-63-2002 photometric files.\n\n\
                  Prints keywords, fields and the candela grid, and converts\n\
                  documents to and from a tagged JSON interchange format."
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

    /// Log output format.
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the keywords, fields and grid summary of an LM-63 file.
    Inspect(InspectArgs),

    /// Print the candela grid of an LM-63 file.
    Candela(CandelaArgs),

    /// Convert an LM-63 file to interchange JSON.
    Export(ExportArgs),

    /// Read interchange JSON and summarize the document it holds.
    Import(ImportArgs),
}

#[derive(Parser)]
pub struct InspectArgs {
    /// LM-63 file to read (`~` expands to the home directory).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Parser)]
pub struct CandelaArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Apply the candela multiplier and ballast factor.
    #[arg(long = "computed")]
    pub computed: bool,

    /// Override the file's candela multiplier (implies --computed).
    #[arg(long = "multiplier", value_name = "X")]
    pub multiplier: Option<f64>,

    /// Override the file's ballast factor (implies --computed).
    #[arg(long = "ballast-factor", value_name = "Y")]
    pub ballast_factor: Option<f64>,
}

#[derive(Parser)]
pub struct ExportArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write JSON here instead of stdout.
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Indent the JSON output.
    #[arg(long = "pretty")]
    pub pretty: bool,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Interchange JSON file.
    #[arg(value_name = "JSON")]
    pub file: PathBuf,
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
