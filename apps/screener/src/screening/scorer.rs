//! Scorer — pluggable seam between the pipeline and the evaluation backend.
//!
//! Default: `ClaudeScorer` (Anthropic Messages API through `LlmClient`).
//! The pipeline holds an `Option<Arc<dyn Scorer>>`; `None` means prompt-only mode.

use async_trait::async_trait;

use crate::llm_client::{LlmClient, LlmError, MODEL};

/// Sends a prompt to an evaluation backend and returns its free-form response.
///
/// Implementations must not mutate shared state; a failure is reported to the
/// caller and never retried here.
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(&self, prompt: &str) -> Result<String, LlmError>;

    /// Human-readable backend label, for logs.
    fn backend(&self) -> String;
}

/// Scores prompts with Claude. An optional system prompt (agent instructions)
/// is sent with every request.
pub struct ClaudeScorer {
    llm: LlmClient,
    system: Option<String>,
}

impl ClaudeScorer {
    pub fn new(llm: LlmClient, system: Option<String>) -> Self {
        Self { llm, system }
    }
}

#[async_trait]
impl Scorer for ClaudeScorer {
    async fn score(&self, prompt: &str) -> Result<String, LlmError> {
        self.llm.call_text(prompt, self.system.as_deref()).await
    }

    fn backend(&self) -> String {
        format!("claude ({MODEL})")
    }
}
