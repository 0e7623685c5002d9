use std::path::PathBuf;

use clap::Parser;

use crate::llm_client::{ANTHROPIC_API_URL, DEFAULT_TIMEOUT_SECS};

/// Command-line surface. Parsing only; validation lives in `Config::from_cli`.
#[derive(Parser, Debug)]
#[command(
    name = "screener",
    version,
    about = "Screen scientific resumes against a scoring rubric using Claude",
    after_help = "\
Examples:
  screener                          Process all PDFs in sample-resumes/
  screener my_resume.pdf            Process a single resume
  screener --dir applications/      Process a different directory

Without an API key, text is extracted and prompts are saved for manual use."
)]
pub struct Cli {
    /// Path to a single PDF resume (optional)
    pub resume: Option<PathBuf>,

    /// Directory containing PDF resumes
    #[arg(short = 'd', long = "dir", default_value = "sample-resumes")]
    pub dir: PathBuf,

    /// Output directory for evaluations
    #[arg(short = 'o', long = "output", default_value = "evaluations")]
    pub output: PathBuf,

    /// Path to the scoring rubric
    #[arg(short = 'r', long = "rubric", default_value = "skills/resume-scoring.md")]
    pub rubric: PathBuf,

    /// Anthropic API key; without one the run is prompt-only
    #[arg(short = 'k', long = "api-key", env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Agent instructions file sent as the system prompt
    #[arg(short = 'i', long = "instructions")]
    pub instructions: Option<PathBuf>,

    /// Messages API endpoint
    #[arg(long = "api-url", env = "ANTHROPIC_API_URL", default_value = ANTHROPIC_API_URL)]
    pub api_url: String,

    /// Per-request timeout for the scoring backend, in seconds
    #[arg(long = "timeout-secs", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Log level for the screener (overridden by RUST_LOG)
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,
}
