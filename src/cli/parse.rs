//! CLI parse: clap types for rsyncx. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// rsyncx - plan the file operations that make one directory mirror another
#[derive(Parser, Debug)]
#[command(name = "rsyncx")]
#[command(about = "Plan add/move/delete operations between two directory trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Entry name to skip while scanning (repeatable)
    #[arg(long = "ignore", global = true)]
    pub ignore: Vec<String>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the change plan that makes DESTINATION mirror SOURCE
    Plan {
        /// Directory whose layout is authoritative
        source: PathBuf,
        /// Directory the plan would modify
        destination: PathBuf,
        /// Output format (defaults to the configured format)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Scan one directory and print its metadata tree
    Scan {
        /// Directory to scan
        root: PathBuf,
        /// Output format (defaults to the configured format)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parse a configured format name; unknown names fall back to text.
    pub fn from_config(name: &str) -> Self {
        match name {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}
