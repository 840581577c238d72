use std::path::PathBuf;

use clap::Parser;

/// Flatten a WPF resource dictionary hierarchy into a single dictionary.
#[derive(Parser)]
#[command(
    name = "rdmerge",
    about = "Merge a resource dictionary hierarchy into one dictionary",
    version
)]
pub struct Cli {
    /// Project root directory containing the dictionaries
    #[arg(short = 'p', long = "project-path")]
    pub project_path: PathBuf,

    /// Project name used in pack URI component segments
    /// (defaults to the project directory's name)
    #[arg(short = 'n', long = "project-name")]
    pub project_name: Option<String>,

    /// Entry dictionary, relative to the project root
    #[arg(short = 's', long = "source")]
    pub source: String,

    /// Output file, relative to the project root
    #[arg(short = 't', long = "target")]
    pub target: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
