//! PipelineRunner — carries one document through the screening pipeline.
//!
//! Flow: extract → persist text → build prompt → (score → persist evaluation
//! | persist prompt) → outcome.
//!
//! Extraction and backend failures are document-scoped: they become an `error`
//! outcome and never propagate. Artifact write failures are run-scoped and
//! returned as `Err`.

use std::fmt;
use std::sync::Arc;

use chrono::Local;
use tracing::{info, warn};

use crate::errors::{ExtractionError, ScreenError};
use crate::models::{Document, Outcome, OutcomeDetail, Rubric};
use crate::screening::extractor::TextExtractor;
use crate::screening::prompts::build_scoring_prompt;
use crate::screening::scorer::Scorer;
use crate::storage::ArtifactStore;

/// Per-document pipeline state, used for progress logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Pending,
    Extracting,
    Extracted,
    ExtractionFailed,
    Scoring,
    Scored,
    PromptOnly,
    Done,
}

impl Stage {
    /// `[n/4]` progress marker for stages that represent forward progress.
    fn progress(self) -> Option<u8> {
        match self {
            Stage::Extracting => Some(1),
            Stage::Extracted => Some(2),
            Stage::Scoring => Some(3),
            Stage::Scored | Stage::PromptOnly => Some(4),
            Stage::Pending | Stage::ExtractionFailed | Stage::Done => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Pending => "pending",
            Stage::Extracting => "extracting",
            Stage::Extracted => "extracted",
            Stage::ExtractionFailed => "extraction_failed",
            Stage::Scoring => "scoring",
            Stage::Scored => "scored",
            Stage::PromptOnly => "prompt_only",
            Stage::Done => "done",
        };
        f.write_str(s)
    }
}

fn enter(document: &Document, stage: Stage) {
    match stage.progress() {
        Some(n) => info!(document = %document, stage = %stage, "[{n}/4] {stage}"),
        None => info!(document = %document, stage = %stage, "{stage}"),
    }
}

/// Shared, read-only collaborators for every document in a run.
pub struct PipelineRunner {
    extractor: Arc<dyn TextExtractor>,
    /// `None` switches the pipeline into prompt-only mode.
    scorer: Option<Arc<dyn Scorer>>,
    store: ArtifactStore,
    rubric: Rubric,
}

impl PipelineRunner {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        scorer: Option<Arc<dyn Scorer>>,
        store: ArtifactStore,
        rubric: Rubric,
    ) -> Self {
        Self {
            extractor,
            scorer,
            store,
            rubric,
        }
    }

    pub fn is_prompt_only(&self) -> bool {
        self.scorer.is_none()
    }

    /// Runs one document to completion. Always yields exactly one outcome
    /// unless an artifact cannot be written.
    pub async fn run(&self, document: &Document) -> Result<Outcome, ScreenError> {
        enter(document, Stage::Pending);
        enter(document, Stage::Extracting);

        let text = match self.extract(document).await {
            Ok(text) => text,
            Err(e) => {
                enter(document, Stage::ExtractionFailed);
                warn!(document = %document, error = %e, "Extraction failed");
                enter(document, Stage::Done);
                return Ok(Outcome {
                    document: document.clone(),
                    detail: OutcomeDetail::Error {
                        extracted_text_file: None,
                        message: e.to_string(),
                    },
                });
            }
        };

        let base_name = document.base_name();
        let extracted_text_file = self.store.write_extracted_text(&base_name, &text).await?;
        enter(document, Stage::Extracted);
        info!(document = %document, chars = text.chars().count(), "Extracted text saved");

        let prompt = build_scoring_prompt(&text, self.rubric.as_str());

        let detail = match &self.scorer {
            None => {
                let prompt_file = self.store.write_prompt(&base_name, &prompt).await?;
                enter(document, Stage::PromptOnly);
                info!(
                    document = %document,
                    prompt_file = %prompt_file.display(),
                    "No backend configured, prompt saved for manual use"
                );
                OutcomeDetail::PromptOnly {
                    extracted_text_file,
                    prompt_file,
                }
            }
            Some(scorer) => {
                enter(document, Stage::Scoring);
                match scorer.score(&prompt).await {
                    Ok(evaluation) => {
                        let evaluation_file = self
                            .store
                            .write_evaluation(&base_name, &evaluation, document.path(), Local::now())
                            .await?;
                        enter(document, Stage::Scored);
                        info!(
                            document = %document,
                            evaluation_file = %evaluation_file.display(),
                            "Evaluation saved"
                        );
                        OutcomeDetail::Completed {
                            extracted_text_file,
                            evaluation_file,
                            evaluation,
                        }
                    }
                    Err(e) => {
                        warn!(
                            document = %document,
                            backend = %scorer.backend(),
                            error = %e,
                            "Scoring failed"
                        );
                        OutcomeDetail::Error {
                            extracted_text_file: Some(extracted_text_file),
                            message: e.to_string(),
                        }
                    }
                }
            }
        };

        enter(document, Stage::Done);
        Ok(Outcome {
            document: document.clone(),
            detail,
        })
    }

    /// pdf-extract can panic on malformed fonts; running it on the blocking
    /// pool turns a panic into a `JoinError`.
    async fn extract(&self, document: &Document) -> Result<String, ExtractionError> {
        let extractor = Arc::clone(&self.extractor);
        let path = document.path().to_path_buf();
        tokio::task::spawn_blocking(move || extractor.extract(&path))
            .await
            .unwrap_or_else(|join_err| {
                Err(ExtractionError::Aborted {
                    path: document.path().to_path_buf(),
                    message: join_err.to_string(),
                })
            })
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{FakeExtractor, FakeScorer};
    use super::*;
    use crate::models::OutcomeKind;
    use std::path::Path;

    const RUBRIC: &str = "## Research Experience (0-30)\n## Publications (0-20)";

    async fn runner(out: &Path, scorer: Option<Arc<dyn Scorer>>) -> PipelineRunner {
        PipelineRunner::new(
            Arc::new(FakeExtractor),
            scorer,
            ArtifactStore::open(out).await.unwrap(),
            Rubric::new(RUBRIC),
        )
    }

    fn evaluation_files(dir: &Path) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().contains("_evaluation_"))
                    .unwrap_or(false)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_backend_success_completes_and_persists_evaluation() {
        let tmp = tempfile::tempdir().unwrap();
        let scorer = Arc::new(FakeScorer::replying("Total Score: 88/100\nTier 1"));
        let runner = runner(tmp.path(), Some(scorer.clone() as Arc<dyn Scorer>)).await;

        let outcome = runner.run(&Document::new("in/alice.pdf")).await.unwrap();

        assert_eq!(outcome.kind(), OutcomeKind::Completed);
        let extracted = tmp.path().join("alice_extracted.txt");
        assert_eq!(std::fs::read_to_string(&extracted).unwrap(), "Resume of alice");

        let evals = evaluation_files(tmp.path());
        assert_eq!(evals.len(), 1);
        let report = std::fs::read_to_string(&evals[0]).unwrap();
        assert!(report.contains("Total Score: 88/100\nTier 1"));
        assert!(report.contains("**Source:** in/alice.pdf"));
        assert!(!tmp.path().join("alice_prompt.txt").exists());

        match outcome.detail {
            OutcomeDetail::Completed {
                evaluation_file,
                evaluation,
                ..
            } => {
                assert_eq!(evaluation_file, evals[0]);
                assert_eq!(evaluation, "Total Score: 88/100\nTier 1");
            }
            other => panic!("unexpected detail {other:?}"),
        }
        assert_eq!(scorer.call_count(), 1);
    }

    #[tokio::test]
    async fn test_no_backend_saves_prompt_with_rubric() {
        let tmp = tempfile::tempdir().unwrap();
        let runner = runner(tmp.path(), None).await;
        assert!(runner.is_prompt_only());

        let outcome = runner.run(&Document::new("in/bob.pdf")).await.unwrap();

        assert_eq!(outcome.kind(), OutcomeKind::PromptOnly);
        let prompt = std::fs::read_to_string(tmp.path().join("bob_prompt.txt")).unwrap();
        assert!(prompt.contains(RUBRIC));
        assert!(prompt.contains("Resume of bob"));
        assert!(tmp.path().join("bob_extracted.txt").exists());
        assert!(evaluation_files(tmp.path()).is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_is_error_outcome_without_evaluation() {
        let tmp = tempfile::tempdir().unwrap();
        let scorer = Arc::new(FakeScorer::failing_on("unused", "Resume of carol"));
        let runner = runner(tmp.path(), Some(scorer.clone() as Arc<dyn Scorer>)).await;

        let outcome = runner.run(&Document::new("in/carol.pdf")).await.unwrap();

        assert_eq!(outcome.kind(), OutcomeKind::Error);
        assert!(outcome.error_message().unwrap().contains("Overloaded"));
        assert!(evaluation_files(tmp.path()).is_empty());
        assert!(tmp.path().join("carol_extracted.txt").exists());
        assert_eq!(scorer.call_count(), 1, "backend must be tried exactly once");
    }

    #[tokio::test]
    async fn test_empty_extraction_still_scored() {
        let tmp = tempfile::tempdir().unwrap();
        let scorer = Arc::new(FakeScorer::replying("Total Score: 0/100"));
        let runner = runner(tmp.path(), Some(scorer.clone() as Arc<dyn Scorer>)).await;

        let outcome = runner.run(&Document::new("in/blank.pdf")).await.unwrap();

        assert_eq!(outcome.kind(), OutcomeKind::Completed);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("blank_extracted.txt")).unwrap(),
            ""
        );
        let prompts = scorer.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(RUBRIC));
    }

    #[tokio::test]
    async fn test_extraction_failure_is_error_outcome_without_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        let scorer = Arc::new(FakeScorer::replying("never"));
        let runner = runner(tmp.path(), Some(scorer.clone() as Arc<dyn Scorer>)).await;

        let outcome = runner.run(&Document::new("in/broken.pdf")).await.unwrap();

        assert_eq!(outcome.kind(), OutcomeKind::Error);
        assert!(outcome.error_message().unwrap().contains("invalid xref table"));
        assert_eq!(
            outcome.detail,
            OutcomeDetail::Error {
                extracted_text_file: None,
                message: outcome.error_message().unwrap().to_string(),
            }
        );
        assert!(!tmp.path().join("broken_extracted.txt").exists());
        assert_eq!(scorer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_extractor_panic_is_contained() {
        let tmp = tempfile::tempdir().unwrap();
        let runner = runner(tmp.path(), None).await;

        let outcome = runner.run(&Document::new("in/panic.pdf")).await.unwrap();

        assert_eq!(outcome.kind(), OutcomeKind::Error);
        assert!(outcome.error_message().unwrap().contains("aborted"));
    }

    #[tokio::test]
    async fn test_unwritable_output_is_run_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        let runner = runner(&out, None).await;
        std::fs::remove_dir(&out).unwrap();
        std::fs::write(&out, "occupied").unwrap();

        let err = runner.run(&Document::new("in/dave.pdf")).await.unwrap_err();
        assert!(matches!(err, ScreenError::ArtifactWrite { .. }), "{err:?}");
    }

    #[test]
    fn test_stage_progress_markers() {
        assert_eq!(Stage::Extracting.progress(), Some(1));
        assert_eq!(Stage::Scored.progress(), Some(4));
        assert_eq!(Stage::PromptOnly.progress(), Some(4));
        assert_eq!(Stage::Done.progress(), None);
        assert_eq!(Stage::ExtractionFailed.to_string(), "extraction_failed");
    }
}
