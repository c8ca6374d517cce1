//! Task output representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Class that represents the result of a task.
///
/// # Fields
///
/// * `description` - Description of the task
/// * `summary` - Summary of the task (auto-generated from description)
/// * `expected_output` - Expected output of the task
/// * `raw` - Raw output of the task
/// * `agent` - Role of the agent that executed the task
/// * `started_at` / `finished_at` - Wall-clock bounds of the execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOutput {
    /// Description of the task.
    pub description: String,
    /// Summary of the task (auto-generated from description).
    pub summary: String,
    /// Expected output of the task.
    pub expected_output: String,
    /// Raw output of the task.
    pub raw: String,
    /// Agent that executed the task.
    pub agent: String,
    /// Start time of the task execution.
    pub started_at: DateTime<Utc>,
    /// End time of the task execution.
    pub finished_at: DateTime<Utc>,
}

impl TaskOutput {
    /// Create a new TaskOutput with summary auto-generated from description.
    pub fn new(
        description: String,
        expected_output: String,
        agent: String,
        raw: String,
        started_at: DateTime<Utc>,
    ) -> Self {
        let summary = Self::generate_summary(&description);
        Self {
            description,
            summary,
            expected_output,
            raw,
            agent,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Generate a summary from the description (first 10 words + "...").
    fn generate_summary(description: &str) -> String {
        let excerpt: String = description
            .split_whitespace()
            .take(10)
            .collect::<Vec<&str>>()
            .join(" ");
        format!("{}...", excerpt)
    }

    /// Get the execution duration in seconds.
    pub fn execution_duration(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

impl fmt::Display for TaskOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
