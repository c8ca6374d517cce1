//! Main Task struct.
//!
//! A task is one unit of work: a description of what to do, the outcome that
//! is expected, and the single agent responsible for it.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::agent::Agent;

/// Represents a task to be executed by exactly one agent.
///
/// The agent is held through an `Arc` so a crew and its tasks can refer to the
/// same agent record without copying it. Equality is structural, including the
/// agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Descriptive text detailing the task's purpose and execution.
    pub description: String,
    /// Clear definition of expected task outcome.
    pub expected_output: String,
    /// Agent responsible for execution.
    pub agent: Arc<Agent>,
}

impl Task {
    /// Create a new Task bound to `agent`.
    pub fn new(
        description: impl Into<String>,
        expected_output: impl Into<String>,
        agent: Arc<Agent>,
    ) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
            agent,
        }
    }

    /// Generate the task prompt handed to the agent.
    pub fn prompt(&self) -> String {
        let tasks_slices = [
            self.description.clone(),
            format!(
                "This is the expected criteria for your final answer: {}\n\
                 You MUST return the actual complete content as the final answer, not a summary.",
                self.expected_output
            ),
        ];

        tasks_slices.join("\n\n")
    }

    /// Compute the key property (MD5 hash of description|expected_output).
    pub fn key(&self) -> String {
        let source = format!("{}|{}", self.description, self.expected_output);
        let mut hasher = Md5::new();
        hasher.update(source.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Task(description={}, expected_output={}, agent={})",
            self.description, self.expected_output, self.agent.role
        )
    }
}
