//! BatchDriver — discovers documents and runs each through the pipeline.
//!
//! Sequential: one document is fully extracted, prompted, and scored before the
//! next begins. Document-scoped failures are already outcomes by the time they
//! get here; only run-scoped errors stop the loop.

use std::path::Path;

use tracing::info;

use crate::config::Input;
use crate::errors::ScreenError;
use crate::models::{Document, RunSummary};
use crate::screening::runner::PipelineRunner;

/// Supported document extension, matched exactly. Artifacts are keyed by file
/// stem, so `cv.pdf` and `cv.PDF` in one directory must not both be picked up.
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// Lists matching files directly inside `dir` (non-recursive), sorted by path.
pub fn discover_documents(dir: &Path) -> Result<Vec<Document>, ScreenError> {
    let read_error = |source| ScreenError::InputDirectory {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && has_document_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    Ok(paths.into_iter().map(Document::new).collect())
}

fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == DOCUMENT_EXTENSION)
}

/// Resolves the configured input into the ordered list of documents to process.
pub fn collect_documents(input: &Input) -> Result<Vec<Document>, ScreenError> {
    match input {
        Input::Single(path) => Ok(vec![Document::new(path.clone())]),
        Input::Directory(dir) => discover_documents(dir),
    }
}

/// Runs every document in order and collects one outcome per document.
pub async fn run_batch(
    runner: &PipelineRunner,
    documents: &[Document],
) -> Result<RunSummary, ScreenError> {
    let mut outcomes = Vec::with_capacity(documents.len());

    for (index, document) in documents.iter().enumerate() {
        info!(
            document = %document,
            "Processing document {}/{}",
            index + 1,
            documents.len()
        );
        let outcome = runner.run(document).await?;
        info!(document = %document, outcome = %outcome.kind(), "Document finished");
        outcomes.push(outcome);
    }

    Ok(RunSummary::from(outcomes))
}
