//! Crew execution.
//!
//! An [`Orchestrator`] takes an assembled [`Crew`] and produces its
//! [`CrewOutput`]. Two implementations ship with the crate:
//!
//! - [`SequentialOrchestrator`] runs each task through an LLM in order,
//!   feeding earlier outputs forward as context.
//! - [`StaticOrchestrator`] answers every task with a fixed text, which makes
//!   crews runnable without network access.

pub mod sequential;
pub mod static_result;

use async_trait::async_trait;

use crate::crew::Crew;
use crate::crews::crew_output::CrewOutput;
use crate::utilities::errors::CrewError;

pub use sequential::SequentialOrchestrator;
pub use static_result::StaticOrchestrator;

/// Executes a crew and returns its result.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    /// Run every task of `crew` according to its process.
    async fn kickoff(&self, crew: &Crew) -> Result<CrewOutput, CrewError>;
}
