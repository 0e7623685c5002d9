use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::errors::ScreenError;
use crate::models::Rubric;

/// What to screen: one document, or every matching document in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Single(PathBuf),
    Directory(PathBuf),
}

/// Resolved run configuration. Everything is validated up front so that a
/// misconfigured run fails before any document is processed.
///
/// The API key lives here and is handed to the LLM client at construction;
/// nothing downstream reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: Input,
    pub output_dir: PathBuf,
    pub rubric_path: PathBuf,
    pub api_key: Option<String>,
    pub instructions_path: Option<PathBuf>,
    pub api_url: String,
    pub timeout_secs: u64,
    pub log_level: String,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ScreenError> {
        let input = match cli.resume {
            Some(path) => {
                if !path.exists() {
                    return Err(ScreenError::Configuration(format!(
                        "File not found: {}",
                        path.display()
                    )));
                }
                Input::Single(path)
            }
            None => {
                if !cli.dir.is_dir() {
                    return Err(ScreenError::Configuration(format!(
                        "Directory not found: {}",
                        cli.dir.display()
                    )));
                }
                Input::Directory(cli.dir)
            }
        };

        require_file(&cli.rubric, "Rubric")?;
        if let Some(path) = &cli.instructions {
            require_file(path, "Instructions file")?;
        }

        if cli.timeout_secs == 0 {
            return Err(ScreenError::Configuration(
                "--timeout-secs must be greater than zero".to_string(),
            ));
        }

        Ok(Config {
            input,
            output_dir: cli.output,
            rubric_path: cli.rubric,
            api_key: cli.api_key.filter(|k| !k.trim().is_empty()),
            instructions_path: cli.instructions,
            api_url: cli.api_url,
            timeout_secs: cli.timeout_secs,
            log_level: cli.log_level,
        })
    }

    pub fn load_rubric(&self) -> Result<Rubric, ScreenError> {
        Rubric::load(&self.rubric_path)
    }

    /// Agent instructions used as the system prompt, if configured.
    pub fn load_instructions(&self) -> Result<Option<String>, ScreenError> {
        self.instructions_path
            .as_deref()
            .map(|path| {
                std::fs::read_to_string(path).map_err(|e| {
                    ScreenError::Configuration(format!(
                        "could not read instructions {}: {e}",
                        path.display()
                    ))
                })
            })
            .transpose()
    }
}

fn require_file(path: &Path, what: &str) -> Result<(), ScreenError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ScreenError::Configuration(format!(
            "{what} not found: {}",
            path.display()
        )))
    }
}
