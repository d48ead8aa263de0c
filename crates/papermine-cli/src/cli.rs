//! CLI command definitions and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// papermine - extract structured dataset metadata from biomedical papers
#[derive(Debug, Parser)]
#[command(name = "papermine")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = crate::config::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract dataset metadata from papers via the completion service
    Extract(ExtractArgs),

    /// Normalize an XML paper to section-tagged plain text, no API calls
    Clean(CleanArgs),
}

/// Arguments for the extract command
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Input files (.xml or cleaned .txt) and/or directories of them
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Where to save the JSON artifacts (overrides config)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Model identifier (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Maximum simultaneous in-flight API calls (overrides config)
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// Arguments for the clean command
#[derive(Debug, Parser)]
pub struct CleanArgs {
    /// XML paper to normalize
    pub xml_file: PathBuf,

    /// Save the cleaned text here instead of printing a preview
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
