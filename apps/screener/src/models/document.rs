use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::ScreenError;

/// One source file to be screened.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Document {
    path: PathBuf,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File stem used to name every artifact produced from this document.
    pub fn base_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "document".to_string())
    }

    /// File name for display in summaries.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Scoring criteria loaded once per run. Opaque to the pipeline and shared
/// read-only across every document in a batch.
#[derive(Debug, Clone)]
pub struct Rubric(Arc<str>);

impl Rubric {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    pub fn load(path: &Path) -> Result<Self, ScreenError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ScreenError::Configuration(format!(
                "could not read rubric {}: {e}",
                path.display()
            ))
        })?;
        Ok(Self::new(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
