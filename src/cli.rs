//! CLI argument definitions for surveyor.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use surveyor::config::CONFIG_PATH;

#[derive(Parser)]
#[command(name = "surveyor")]
#[command(version)]
#[command(about = "Validate survey definitions and render them into interactive pages", long_about = None)]
#[command(
    after_help = "GETTING STARTED:\n    surveyor validate surveys/sleep-habits.json   Check a survey\n    surveyor generate sleep-habits                Build its page and list it\n    surveyor rebuild-index                        Rebuild the survey list from surveys/"
)]
pub struct Cli {
    /// Path to the project config file
    #[arg(long, global = true, value_name = "PATH", default_value = CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a survey file against the schema and the consistency rules
    Validate {
        /// Survey file to check
        path: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Validate a survey and render its interactive page
    ///
    /// Reads <surveys_dir>/<ID>.json, writes <output_dir>/<ID>/index.html and
    /// updates the survey list. Nothing is written when validation fails.
    Generate {
        /// Survey identifier (file name without .json)
        id: String,
    },
    /// Rebuild the survey list from every survey file
    RebuildIndex,
    /// Show version information
    Version {
        /// Show build details
        #[arg(long, short)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
