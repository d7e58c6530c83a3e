use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dynemu_core::config::DEFAULT_BASE_URL;

#[derive(Debug, Parser)]
#[command(
    name = "dynemu",
    version,
    about = "Dynamic emulation triage for Windows PE samples"
)]
pub struct Args {
    /// Path to the PE sample to submit
    pub sample_path: PathBuf,

    /// Base URL of the emulation service
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Directory for the raw results artifact (defaults to the system temp dir)
    #[arg(long)]
    pub artifact_dir: Option<PathBuf>,

    /// Abort the submission after this many seconds (no limit by default)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Display name of the program (defaults to the file name)
    #[arg(long)]
    pub name: Option<String>,

    /// Language identifier reported by the host analysis environment
    #[arg(long, default_value = "unknown")]
    pub language_id: String,

    /// Compiler specification reported by the host analysis environment
    #[arg(long, default_value = "unknown")]
    pub compiler_spec: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
