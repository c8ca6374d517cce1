//! Crew output representation.
//!
//! Represents the result of a crew execution: the final raw text, the output
//! of every task in execution order, and the token usage of the run.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::tasks::task_output::TaskOutput;
use crate::types::usage_metrics::UsageMetrics;

/// Class that represents the result of a crew.
///
/// # Fields
///
/// * `kickoff_id` - Identifier of the kickoff that produced this output.
/// * `raw` - Raw output of crew (the final task's raw text).
/// * `tasks_output` - Output of each task in execution order.
/// * `token_usage` - Processed token summary across all tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewOutput {
    /// Identifier of the kickoff.
    pub kickoff_id: Uuid,
    /// Raw output of crew.
    pub raw: String,
    /// Output of each task.
    pub tasks_output: Vec<TaskOutput>,
    /// Processed token summary.
    pub token_usage: UsageMetrics,
}

impl CrewOutput {
    /// Create a new CrewOutput whose raw text is the last task's output.
    ///
    /// Returns `None` when there are no task outputs.
    pub fn from_tasks(tasks_output: Vec<TaskOutput>, token_usage: UsageMetrics) -> Option<Self> {
        let raw = tasks_output.last()?.raw.clone();
        Some(Self {
            kickoff_id: Uuid::new_v4(),
            raw,
            tasks_output,
            token_usage,
        })
    }
}

impl fmt::Display for CrewOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
