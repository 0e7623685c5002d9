//! Human-readable console output: startup banner and end-of-run summary.
//! Rendering is pure; `main` does the printing.

use crate::config::{Config, Input};
use crate::models::{OutcomeDetail, OutcomeKind, RunSummary};

const RULE_WIDTH: usize = 60;

fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn light_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

pub fn render_banner(config: &Config) -> String {
    let backend = if config.api_key.is_some() {
        "Claude API (automated)"
    } else {
        "None (prompt-only mode)"
    };
    format!(
        "{rule}\nSCIENTIFIC RESUME SCREENING SYSTEM\n{rule}\n\
         Rubric: {}\nOutput: {}/\nAPI:    {backend}",
        config.rubric_path.display(),
        config.output_dir.display(),
        rule = heavy_rule(),
    )
}

/// Line shown before a batch starts, or the distinct "nothing to do" report.
pub fn render_discovery(input: &Input, found: usize) -> String {
    match input {
        Input::Directory(dir) if found == 0 => {
            format!("No PDF files found in {}/", dir.display())
        }
        _ => format!("Found {found} PDF resume(s) to process"),
    }
}

pub fn render_summary(summary: &RunSummary) -> String {
    let completed = summary.count(OutcomeKind::Completed);
    let prompt_only = summary.count(OutcomeKind::PromptOnly);
    let errors = summary.count(OutcomeKind::Error);

    let mut lines = vec![
        heavy_rule(),
        "PROCESSING SUMMARY".to_string(),
        heavy_rule(),
        String::new(),
        format!("Total processed: {}", summary.len()),
        format!("  ✓ Evaluated:    {completed}"),
        format!("  ○ Prompt only:  {prompt_only}"),
        format!("  ✗ Errors:       {errors}"),
    ];

    if completed > 0 {
        lines.extend(section("COMPLETED EVALUATIONS:"));
        for outcome in summary.of_kind(OutcomeKind::Completed) {
            if let OutcomeDetail::Completed {
                evaluation_file, ..
            } = &outcome.detail
            {
                lines.extend(entry(
                    &outcome.document.file_name(),
                    &evaluation_file.display().to_string(),
                ));
            }
        }
    }

    if prompt_only > 0 {
        lines.extend(section("PROMPTS SAVED (no API key):"));
        lines.extend([
            String::new(),
            "To evaluate these resumes, either:".to_string(),
            "  1. Set ANTHROPIC_API_KEY and re-run".to_string(),
            "  2. Paste the prompt contents into Claude manually".to_string(),
        ]);
        for outcome in summary.of_kind(OutcomeKind::PromptOnly) {
            if let OutcomeDetail::PromptOnly { prompt_file, .. } = &outcome.detail {
                lines.extend(entry(
                    &outcome.document.file_name(),
                    &prompt_file.display().to_string(),
                ));
            }
        }
    }

    if errors > 0 {
        lines.extend(section("ERRORS:"));
        for outcome in summary.of_kind(OutcomeKind::Error) {
            lines.extend(entry(
                &outcome.document.file_name(),
                outcome.error_message().unwrap_or_default(),
            ));
        }
    }

    lines.iter().map(|line| format!("{line}\n")).collect()
}

fn section(title: &str) -> [String; 4] {
    [String::new(), light_rule(), title.to_string(), light_rule()]
}

fn entry(name: &str, detail: &str) -> [String; 3] {
    [String::new(), format!("  {name}"), format!("  → {detail}")]
}
