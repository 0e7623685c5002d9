//! ArtifactStore — persists extracted text, prompts, and evaluations.
//!
//! Every file is keyed by the document's base name inside one output directory.
//! Extracted text and prompts overwrite on re-run; evaluations carry a
//! timestamp suffix so earlier runs are kept.
//!
//! A failed write is run-fatal (`ScreenError::ArtifactWrite`).

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::errors::ScreenError;

/// Millisecond resolution so back-to-back runs of one document keep both files.
const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";
const HEADER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    output_dir: PathBuf,
}

impl ArtifactStore {
    /// Opens the store, creating the output directory if absent.
    pub async fn open(output_dir: impl Into<PathBuf>) -> Result<Self, ScreenError> {
        let store = Self {
            output_dir: output_dir.into(),
        };
        store.ensure_dir().await?;
        Ok(store)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn write_extracted_text(
        &self,
        base_name: &str,
        text: &str,
    ) -> Result<PathBuf, ScreenError> {
        let path = self.output_dir.join(format!("{base_name}_extracted.txt"));
        self.write(&path, text).await?;
        Ok(path)
    }

    pub async fn write_prompt(&self, base_name: &str, prompt: &str) -> Result<PathBuf, ScreenError> {
        let path = self.output_dir.join(format!("{base_name}_prompt.txt"));
        self.write(&path, prompt).await?;
        Ok(path)
    }

    /// Writes `{base}_evaluation_{timestamp}.md`: a header block followed by
    /// the raw evaluation text.
    pub async fn write_evaluation(
        &self,
        base_name: &str,
        evaluation: &str,
        source_path: &Path,
        evaluated_at: DateTime<Local>,
    ) -> Result<PathBuf, ScreenError> {
        let path = self.output_dir.join(format!(
            "{base_name}_evaluation_{}.md",
            evaluated_at.format(FILE_TIMESTAMP_FORMAT)
        ));
        let report = render_evaluation(base_name, evaluation, source_path, evaluated_at);
        self.write(&path, &report).await?;
        Ok(path)
    }

    async fn ensure_dir(&self) -> Result<(), ScreenError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| ScreenError::ArtifactWrite {
                path: self.output_dir.clone(),
                source,
            })
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<(), ScreenError> {
        self.ensure_dir().await?;
        tokio::fs::write(path, contents)
            .await
            .map_err(|source| ScreenError::ArtifactWrite {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), bytes = contents.len(), "Artifact written");
        Ok(())
    }
}

fn render_evaluation(
    base_name: &str,
    evaluation: &str,
    source_path: &Path,
    evaluated_at: DateTime<Local>,
) -> String {
    format!(
        "# Resume Evaluation: {base_name}\n\
         **Evaluated:** {}\n\
         **Source:** {}\n\n\
         ---\n\n\
         {evaluation}",
        evaluated_at.format(HEADER_TIMESTAMP_FORMAT),
        source_path.display()
    )
}
