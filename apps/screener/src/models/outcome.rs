use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::models::document::Document;

/// Terminal classification of one document's run through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Completed,
    PromptOnly,
    Error,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutcomeKind::Completed => "completed",
            OutcomeKind::PromptOnly => "prompt_only",
            OutcomeKind::Error => "error",
        };
        f.write_str(s)
    }
}

/// What the pipeline left behind for a document, by outcome kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeDetail {
    Completed {
        extracted_text_file: PathBuf,
        evaluation_file: PathBuf,
        evaluation: String,
    },
    PromptOnly {
        extracted_text_file: PathBuf,
        prompt_file: PathBuf,
    },
    /// Extraction or scoring failed. `extracted_text_file` is `None` when the
    /// failure happened before any text was available.
    Error {
        extracted_text_file: Option<PathBuf>,
        message: String,
    },
}

/// Exactly one of these is produced per document per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub document: Document,
    pub detail: OutcomeDetail,
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        match self.detail {
            OutcomeDetail::Completed { .. } => OutcomeKind::Completed,
            OutcomeDetail::PromptOnly { .. } => OutcomeKind::PromptOnly,
            OutcomeDetail::Error { .. } => OutcomeKind::Error,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.detail {
            OutcomeDetail::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Outcomes of one batch invocation, in processing order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    outcomes: Vec<Outcome>,
}

impl RunSummary {
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcomes of one kind, preserving processing order.
    pub fn of_kind(&self, kind: OutcomeKind) -> impl Iterator<Item = &Outcome> {
        self.outcomes().iter().filter(move |o| o.kind() == kind)
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.of_kind(kind).count()
    }
}

impl From<Vec<Outcome>> for RunSummary {
    fn from(outcomes: Vec<Outcome>) -> Self {
        Self { outcomes }
    }
}
