mod cli;
mod config;
mod errors;
mod llm_client;
mod models;
mod report;
mod screening;
mod storage;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::models::RunSummary;
use crate::screening::{
    collect_documents, run_batch, ClaudeScorer, PdfTextExtractor, PipelineRunner, Scorer,
};
use crate::storage::ArtifactStore;

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so clap's env fallbacks can see it
    dotenvy::dotenv().ok();

    let config = Config::from_cli(Cli::parse())?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.log_level))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    // Document-level failures are outcomes, not errors: the process exits 0
    // whenever the run itself completes.
    run(&config).await?;
    Ok(())
}

/// One full screening run. Returns `Err` only for run-scoped failures
/// (configuration, unreadable input, artifact writes).
async fn run(config: &Config) -> Result<RunSummary> {
    println!("{}", report::render_banner(config));

    // Run-scoped inputs, loaded once and shared read-only
    let rubric = config.load_rubric()?;
    let instructions = config.load_instructions()?;
    let store = ArtifactStore::open(&config.output_dir).await?;
    info!(output_dir = %store.output_dir().display(), "Artifact store ready");

    let scorer: Option<Arc<dyn Scorer>> = match &config.api_key {
        Some(api_key) => {
            let llm = LlmClient::new(api_key.clone(), config.api_url.clone(), config.timeout_secs)?;
            let scorer = ClaudeScorer::new(llm, instructions);
            info!("Scoring backend initialized ({})", scorer.backend());
            Some(Arc::new(scorer) as Arc<dyn Scorer>)
        }
        None => {
            info!("No API key configured, running in prompt-only mode");
            None
        }
    };

    let runner = PipelineRunner::new(Arc::new(PdfTextExtractor), scorer, store, rubric);
    info!(prompt_only = runner.is_prompt_only(), "Pipeline ready");

    let documents = collect_documents(&config.input)?;
    println!();
    println!("{}", report::render_discovery(&config.input, documents.len()));

    let summary = run_batch(&runner, &documents).await?;
    if summary.is_empty() {
        info!("No input documents found, nothing to screen");
    }

    println!();
    print!("{}", report::render_summary(&summary));
    println!();
    println!("{}", "=".repeat(60));
    println!("Done!");
    println!("{}", "=".repeat(60));

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::errors::ScreenError;
    use crate::models::OutcomeKind;

    struct Workspace {
        tmp: tempfile::TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            let tmp = tempfile::tempdir().unwrap();
            std::fs::create_dir(tmp.path().join("resumes")).unwrap();
            std::fs::write(tmp.path().join("rubric.md"), "# Rubric").unwrap();
            Self { tmp }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.tmp.path().join(name)
        }

        fn add_document(&self, name: &str, bytes: &[u8]) {
            std::fs::write(self.path("resumes").join(name), bytes).unwrap();
        }
    }

    /// Mirrors `main`: parse, validate, run.
    async fn screen(args: &[&str]) -> Result<RunSummary> {
        let mut argv = vec!["screener"];
        argv.extend_from_slice(args);
        let config = Config::from_cli(Cli::try_parse_from(argv)?)?;
        run(&config).await
    }

    fn arg(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    #[tokio::test]
    async fn test_failed_documents_still_complete_the_run() {
        let ws = Workspace::new();
        ws.add_document("garbage.pdf", b"not a pdf at all");
        ws.add_document("truncated.pdf", b"%PDF-1.4\n");
        let (resumes, rubric, out) = (ws.path("resumes"), ws.path("rubric.md"), ws.path("out"));

        let summary = screen(&[
            "-d",
            arg(&resumes),
            "-r",
            arg(&rubric),
            "-o",
            arg(&out),
            "--api-key",
            "",
        ])
        .await
        .unwrap();

        assert_eq!(summary.len(), 2);
        assert_eq!(summary.count(OutcomeKind::Error), 2);
        assert!(out.is_dir());
    }

    #[tokio::test]
    async fn test_empty_directory_completes_with_empty_summary() {
        let ws = Workspace::new();
        let (resumes, rubric, out) = (ws.path("resumes"), ws.path("rubric.md"), ws.path("out"));

        let summary = screen(&["-d", arg(&resumes), "-r", arg(&rubric), "-o", arg(&out), "-k", ""])
            .await
            .unwrap();
        assert!(summary.is_empty());
    }

    #[tokio::test]
    async fn test_missing_input_fails_the_run() {
        let ws = Workspace::new();
        let rubric = ws.path("rubric.md");

        let err = screen(&["-d", "/no/such/resumes", "-r", arg(&rubric), "-k", ""])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Directory not found"), "{err}");
    }

    #[tokio::test]
    async fn test_input_removed_after_validation_fails_the_run() {
        let ws = Workspace::new();
        let (resumes, rubric, out) = (ws.path("resumes"), ws.path("rubric.md"), ws.path("out"));
        let config = Config::from_cli(
            Cli::try_parse_from([
                "screener",
                "-d",
                arg(&resumes),
                "-r",
                arg(&rubric),
                "-o",
                arg(&out),
                "-k",
                "",
            ])
            .unwrap(),
        )
        .unwrap();
        std::fs::remove_dir(&resumes).unwrap();

        let err = run(&config).await.unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<ScreenError>(),
                Some(ScreenError::InputDirectory { .. })
            ),
            "{err}"
        );
    }

    #[tokio::test]
    async fn test_unwritable_output_fails_the_run() {
        let ws = Workspace::new();
        ws.add_document("cv.pdf", b"%PDF-1.4\n");
        let (resumes, rubric) = (ws.path("resumes"), ws.path("rubric.md"));
        let blocker = ws.path("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = screen(&["-d", arg(&resumes), "-r", arg(&rubric), "-o", arg(&blocker), "-k", ""])
            .await
            .unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<ScreenError>(),
                Some(ScreenError::ArtifactWrite { .. })
            ),
            "{err}"
        );
    }
}
