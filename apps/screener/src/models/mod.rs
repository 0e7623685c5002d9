pub mod document;
pub mod outcome;

pub use document::{Document, Rubric};
pub use outcome::{Outcome, OutcomeDetail, OutcomeKind, RunSummary};
