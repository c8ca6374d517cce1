//! Development crew: a Planner feeding a Developer.
//!
//! Runs the crew once and prints its result to stdout. Configuration comes
//! from the environment (`CREW_LLM`, `CREW_STUB_RESULT`, ...); see
//! [`crew_assembler::Settings`].

use std::process::ExitCode;

use crew_assembler::{cli, CrewKind};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    cli::main_for(CrewKind::Development).await
}
