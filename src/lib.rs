//! # crew-assembler
//!
//! Four ready-made two-agent crews (business analytics, development, software
//! engineering, website) and the machinery to run them.
//!
//! A [`Crew`] is plain configuration: ordered [`Agent`]s, ordered [`Task`]s
//! bound to those agents, and a [`Process`]. Running it is delegated to an
//! [`Orchestrator`]; [`SequentialOrchestrator`] drives the tasks through an
//! LLM provider, [`StaticOrchestrator`] answers with a fixed text.
//!
//! ```no_run
//! use crew_assembler::{build_pipeline, CrewKind, StaticOrchestrator};
//!
//! # async fn demo() -> Result<(), crew_assembler::CrewError> {
//! let crew = build_pipeline(CrewKind::Website);
//! let output = crew_assembler::cli::run(&crew, &StaticOrchestrator::new("OK")).await?;
//! assert_eq!(output.raw, "OK");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod cli;
pub mod crew;
pub mod crews;
pub mod llm;
pub mod llms;
pub mod orchestrator;
pub mod process;
pub mod task;
pub mod tasks;
pub mod types;
pub mod utilities;

pub use agent::Agent;
pub use crew::Crew;
pub use crews::catalog::{build_pipeline, CrewKind};
pub use crews::crew_output::CrewOutput;
pub use llms::base_llm::BaseLLM;
pub use orchestrator::{Orchestrator, SequentialOrchestrator, StaticOrchestrator};
pub use process::Process;
pub use task::Task;
pub use tasks::task_output::TaskOutput;
pub use utilities::config::Settings;
pub use utilities::errors::{CrewError, LlmError};
