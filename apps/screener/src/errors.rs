use std::path::PathBuf;

use thiserror::Error;

/// Run-scoped errors. Any of these stops the whole run.
///
/// Document-scoped failures (`ExtractionError`, `LlmError`) never surface here;
/// the pipeline runner turns them into an `error` outcome for that document.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to write artifact {}: {source}", path.display())]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read input directory {}: {source}", path.display())]
    InputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to turn a source document into text. Fatal to that document only.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Extraction of {} aborted: {message}", path.display())]
    Aborted { path: PathBuf, message: String },
}
