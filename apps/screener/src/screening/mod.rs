// Screening pipeline: extract → prompt → score → persist, one document at a time.
// All backend calls go through llm_client via the Scorer seam.

pub mod batch;
pub mod extractor;
pub mod prompts;
pub mod runner;
pub mod scorer;

pub use batch::{collect_documents, run_batch};
pub use extractor::PdfTextExtractor;
pub use runner::PipelineRunner;
pub use scorer::{ClaudeScorer, Scorer};
