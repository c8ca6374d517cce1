//! Entry-point plumbing shared by the crew binaries.
//!
//! Each binary picks a [`CrewKind`] and hands it to [`run_crew`], which reads
//! [`Settings`] from the environment, chooses an orchestrator, runs the crew
//! once and prints the result followed by a newline. Logs go to stderr so
//! stdout carries only the crew result.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::crew::Crew;
use crate::crews::catalog::{build_pipeline, CrewKind};
use crate::crews::crew_output::CrewOutput;
use crate::llm::create_llm;
use crate::orchestrator::{Orchestrator, SequentialOrchestrator, StaticOrchestrator};
use crate::utilities::config::Settings;
use crate::utilities::errors::CrewError;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Run `crew` once through `orchestrator` and return its result.
pub async fn run(crew: &Crew, orchestrator: &dyn Orchestrator) -> Result<CrewOutput, CrewError> {
    crew.kickoff(orchestrator).await
}

/// Build the crew for `kind`, run it, and write the result plus a trailing
/// newline to `out`.
pub async fn run_with<W: Write>(
    kind: CrewKind,
    orchestrator: &dyn Orchestrator,
    out: &mut W,
) -> Result<CrewOutput> {
    let crew = build_pipeline(kind);
    let output = run(&crew, orchestrator)
        .await
        .with_context(|| format!("{} crew failed", kind))?;

    writeln!(out, "{}", output).context("Failed to write crew result")?;
    out.flush().context("Failed to flush crew result")?;
    Ok(output)
}

/// Pick the orchestrator described by `settings`.
///
/// `CREW_STUB_RESULT` wins over any model configuration, so a stubbed run
/// never needs credentials.
pub fn orchestrator_from_settings(settings: &Settings) -> Result<Box<dyn Orchestrator>, CrewError> {
    if let Some(result) = &settings.stub_result {
        log::info!("Using static orchestrator (CREW_STUB_RESULT is set)");
        return Ok(Box::new(StaticOrchestrator::new(result.clone())));
    }

    let llm = create_llm(settings)?;
    Ok(Box::new(SequentialOrchestrator::new(Arc::from(llm))))
}

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG`.
///
/// `log` records emitted by the library are forwarded through the same
/// subscriber. Calling this twice is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Full binary flow for one catalogued crew.
pub async fn run_crew(kind: CrewKind) -> Result<()> {
    let settings = Settings::from_env().context("Failed to read configuration")?;
    let orchestrator =
        orchestrator_from_settings(&settings).context("Failed to set up the orchestrator")?;

    tracing::debug!(crew = kind.name(), llm = %settings.llm, "running crew");
    let stdout = std::io::stdout();
    run_with(kind, orchestrator.as_ref(), &mut stdout.lock()).await?;
    Ok(())
}

/// `main` body for the crew binaries: run, report errors on stderr, and map
/// the outcome to an exit code.
pub async fn main_for(kind: CrewKind) -> ExitCode {
    init_tracing();

    match run_crew(kind).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(crew = kind.name(), "{:#}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settings(stub: Option<&str>, llm: &str) -> Settings {
        Settings {
            llm: llm.to_string(),
            base_url: None,
            temperature: None,
            max_tokens: None,
            timeout: Duration::from_secs(5),
            max_retries: 0,
            stub_result: stub.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_run_with_writes_result_and_newline() {
        let mut out = Vec::new();
        let output = run_with(CrewKind::Website, &StaticOrchestrator::new("OK"), &mut out)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "OK\n");
        assert_eq!(output.raw, "OK");
    }

    #[tokio::test]
    async fn test_run_returns_orchestrator_result() {
        let crew = build_pipeline(CrewKind::Development);
        let output = run(&crew, &StaticOrchestrator::new("plan")).await.unwrap();
        assert_eq!(output.raw, "plan");
        assert_eq!(output.tasks_output[0].agent, "Planner");
    }

    #[tokio::test]
    async fn test_stub_result_selects_static_orchestrator() {
        let orchestrator = orchestrator_from_settings(&settings(Some("stubbed"), "")).unwrap();
        let mut out = Vec::new();
        run_with(CrewKind::BusinessAnalytics, orchestrator.as_ref(), &mut out)
            .await
            .unwrap();
        assert_eq!(out, b"stubbed\n");
    }

    #[test]
    fn test_empty_model_without_stub_is_config_error() {
        let err = orchestrator_from_settings(&settings(None, "")).err().unwrap();
        assert!(matches!(err, CrewError::Config(_)));
    }
}
